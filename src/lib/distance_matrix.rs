use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use hashbrown::HashMap;
use ndarray::{Array2, ArrayView2};
use crate::ani_error::AniError;

const SYMMETRY_TOLERANCE: f64 = 1e-8;

fn same_value(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || (a - b).abs() <= SYMMETRY_TOLERANCE
}

/// A square, symmetric matrix of distances between genomes, labeled by genome name.
/// Missing estimates are NaN.
#[derive(Clone, Debug)]
pub struct DistanceMatrix {
    ids: Vec<String>,
    id2index: HashMap<String, usize>,
    data: Array2<f64>,
}

impl DistanceMatrix {
    pub fn new(data: Array2<f64>, ids: Vec<String>) -> Result<Self, AniError> {
        let (rows, columns) = data.dim();
        if rows != columns {
            return Err(AniError::invalid_matrix(format!("data must be square, got {rows}x{columns}")));
        }
        if ids.len() != rows {
            return Err(AniError::invalid_matrix(format!("got {} ids for a {rows}x{rows} matrix", ids.len())));
        }

        let mut id2index = HashMap::with_capacity(ids.len());
        for (index, id) in ids.iter().enumerate() {
            if id2index.insert(id.clone(), index).is_some() {
                return Err(AniError::invalid_matrix(format!("id '{id}' appears more than once")));
            }
        }

        for i in 0..rows {
            for j in (i + 1)..rows {
                if !same_value(data[[i, j]], data[[j, i]]) {
                    return Err(AniError::invalid_matrix(format!("data is not symmetric, ({}, {}) is {} but ({}, {}) is {}",
                                                                ids[i], ids[j], data[[i, j]], ids[j], ids[i], data[[j, i]])));
                }
            }
        }

        Ok(Self { ids, id2index, data })
    }

    pub fn ids(&self) -> &[String] { &self.ids }
    pub fn data(&self) -> ArrayView2<f64> { self.data.view() }
    pub fn shape(&self) -> (usize, usize) { self.data.dim() }
    pub fn len(&self) -> usize { self.ids.len() }
    pub fn is_empty(&self) -> bool { self.ids.is_empty() }
    pub fn index(&self, id: &str) -> Option<usize> { self.id2index.get(id).copied() }

    pub fn get(&self, id1: &str, id2: &str) -> Option<f64> {
        Some(self.data[[self.index(id1)?, self.index(id2)?]])
    }

    /*
    Write in lsmat layout: a header line with an empty first cell followed by the ids,
    then one line per id with its row of distances. NaN is written as 'nan'.
     */
    pub fn write_tsv<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for id in &self.ids {
            write!(writer, "\t{id}")?;
        }
        writeln!(writer)?;

        for (id, row) in self.ids.iter().zip(self.data.rows()) {
            write!(writer, "{id}")?;
            for value in row {
                if value.is_nan() {
                    write!(writer, "\tnan")?;
                } else {
                    write!(writer, "\t{value:?}")?;
                }
            }
            writeln!(writer)?;
        }
        Ok(())
    }

    pub fn save(&self, destination: &Path) -> Result<(), AniError> {
        let context = || format!("Failed to write the distance matrix to '{}'", destination.display());
        let f = File::create(destination).map_err(|e| AniError::io(context(), e))?;
        let mut buf_writer = BufWriter::new(f);
        self.write_tsv(&mut buf_writer)
            .and_then(|_| buf_writer.flush())
            .map_err(|e| AniError::io(context(), e))
    }
}
