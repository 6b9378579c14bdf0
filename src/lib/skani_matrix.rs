// Reader for the square matrix written by `skani triangle --full-matrix`.
//
// Layout:
//   <number of genomes>
//   <genome path>\t<v_1>\t...\t<v_n>
//   ...

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use hashbrown::HashSet;
use ndarray::Array2;
use crate::ani_error::AniError;

const MISSING_VALUE_MARKERS: [&str; 5] = ["", "NA", "N/A", "NaN", "nan"];

/// Genome identifier for a path, the file name without its extension.
pub fn genome_id(genome_path: &str) -> Option<String> {
    Path::new(genome_path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
}

fn parse_value(value: &str) -> Option<f64> {
    let value = value.trim();
    if MISSING_VALUE_MARKERS.contains(&value) {
        Some(f64::NAN)
    } else {
        value.parse::<f64>().ok()
    }
}

/// Parsed matrix, labels are in row order and are the same for the columns.
#[derive(Debug)]
pub struct TriangleMatrix {
    pub ids: Vec<String>,
    pub values: Array2<f64>,
}

pub fn read_triangle_matrix(matrix_file: &Path) -> Result<TriangleMatrix, AniError> {
    let f = File::open(matrix_file).map_err(|e| AniError::parse(matrix_file, None, format!("failed to open, got '{e}'")))?;
    let buf_reader = BufReader::new(f);
    let mut lines = buf_reader.lines();

    // The first line only holds the number of genomes
    match lines.next() {
        Some(Ok(_)) => {},
        Some(Err(e)) => return Err(AniError::parse(matrix_file, Some(1), format!("failed to read, got '{e}'"))),
        None => return Err(AniError::parse(matrix_file, None, "file is empty, expected a header line")),
    }

    let mut ids = Vec::new();
    let mut seen_ids = HashSet::new();
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for (index, line) in lines.enumerate() {
        let line_number = index + 2;
        let line = line.map_err(|e| AniError::parse(matrix_file, Some(line_number), format!("failed to read, got '{e}'")))?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if line.trim().is_empty() {
            continue;
        }

        let mut line_parts = line.split('\t');
        let genome_path = line_parts.next().unwrap_or_default();
        let Some(id) = genome_id(genome_path) else {
            return Err(AniError::parse(matrix_file, Some(line_number), format!("can not derive a genome name from '{genome_path}'")));
        };
        if !seen_ids.insert(id.clone()) {
            return Err(AniError::parse(matrix_file, Some(line_number), format!("genome '{id}' appears more than once")));
        }

        let row = line_parts
            .map(|value| parse_value(value).ok_or_else(|| AniError::parse(matrix_file, Some(line_number), format!("'{value}' is not a number"))))
            .collect::<Result<Vec<f64>, AniError>>()?;
        if row.is_empty() {
            return Err(AniError::parse(matrix_file, Some(line_number), format!("genome '{id}' has no values")));
        }
        if let Some(first_row) = rows.first() {
            if first_row.len() != row.len() {
                return Err(AniError::parse(matrix_file, Some(line_number), format!("expected {} values, found {}", first_row.len(), row.len())));
            }
        }

        ids.push(id);
        rows.push(row);
    }

    let n = rows.len();
    if n == 0 {
        return Err(AniError::parse(matrix_file, None, "no genomes found after the header line"));
    }
    if rows[0].len() != n {
        return Err(AniError::parse(matrix_file, None, format!("matrix is not square, {n} rows with {} values each", rows[0].len())));
    }

    let values = Array2::from_shape_vec((n, n), rows.into_iter().flatten().collect())
        .map_err(|e| AniError::parse(matrix_file, None, e.to_string()))?;

    Ok(TriangleMatrix { ids, values })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use crate::ani_error::AniError;
    use crate::skani_matrix::{genome_id, read_triangle_matrix};

    #[test]
    fn test_genome_id() {
        assert_eq!(genome_id("/data/mags/genome1.fasta"), Some("genome1".to_string()));
        assert_eq!(genome_id("sample_a/bin.3.fasta"), Some("bin.3".to_string()));
        assert_eq!(genome_id("plain"), Some("plain".to_string()));
        assert_eq!(genome_id(""), None);
    }

    #[test]
    fn test_read_matrix() {
        let matrix = read_triangle_matrix(&PathBuf::from("tests/data/triangle.matrix")).unwrap();
        assert_eq!(matrix.ids, ["genome1", "genome2", "genome3"]);
        assert_eq!(matrix.values.shape(), &[3, 3]);
        assert_eq!(matrix.values[[0, 1]], 0.1);
        assert_eq!(matrix.values[[1, 0]], 0.1);
        assert_eq!(matrix.values[[0, 0]], 0.0);
        assert_eq!(matrix.values[[2, 1]], 0.3);
    }

    #[test]
    fn test_read_matrix_with_missing_values() {
        let matrix = read_triangle_matrix(&PathBuf::from("tests/data/triangle_na.matrix")).unwrap();
        assert_eq!(matrix.values.shape(), &[3, 3]);
        assert!(matrix.values[[0, 1]].is_nan());
        assert!(matrix.values[[1, 0]].is_nan());
        assert_eq!(matrix.values[[0, 2]], 0.2);
    }

    #[test]
    fn test_read_matrix_wrong_column_count() {
        let e = read_triangle_matrix(&PathBuf::from("tests/data/triangle_invalid.matrix")).unwrap_err();
        assert!(matches!(e, AniError::Parse { line: Some(3), .. }));
    }

    #[test]
    fn test_read_missing_file() {
        let e = read_triangle_matrix(&PathBuf::from("tests/data/no_such.matrix")).unwrap_err();
        assert!(e.to_string().contains("no_such.matrix"));
    }

    #[test]
    fn test_matrix_debug() {
        let matrix = read_triangle_matrix(&PathBuf::from("tests/data/triangle.matrix")).unwrap();
        let debug = format!("{matrix:?}");
        assert!(debug.contains("genome1"));
        assert!(debug.contains("genome3"));
    }

    #[test]
    fn test_read_malformed_matrices() {
        let work_dir = tempdir::TempDir::new("skani_triangle").unwrap();
        let cases = [
            ("empty", ""),
            ("header_only", "2\n"),
            ("not_square", "2\na.fasta\t0.0\t1.0\t2.0\nb.fasta\t1.0\t0.0\t2.0\n"),
            ("not_number", "2\na.fasta\t0.0\tabc\nb.fasta\t1.0\t0.0\n"),
            ("duplicate", "2\nx/a.fasta\t0.0\t1.0\ny/a.fasta\t1.0\t0.0\n"),
            ("no_values", "1\na.fasta\n"),
        ];
        for (name, content) in cases {
            let path = work_dir.path().join(name);
            std::fs::write(&path, content).unwrap();
            assert!(matches!(read_triangle_matrix(&path), Err(AniError::Parse { .. })), "{name} should fail");
        }
    }

    #[test]
    fn test_read_square_matrix_of_any_size() {
        let work_dir = tempdir::TempDir::new("skani_triangle").unwrap();
        for n in 1..6_usize {
            let mut content = format!("{n}\n");
            for i in 0..n {
                content.push_str(&format!("/genomes/g{i}.fasta"));
                for j in 0..n {
                    content.push_str(&format!("\t{}", i.abs_diff(j) as f64 * 1.5));
                }
                content.push_str("\r\n");
            }
            let path = work_dir.path().join(format!("{n}.matrix"));
            std::fs::write(&path, content).unwrap();

            let matrix = read_triangle_matrix(&path).unwrap();
            assert_eq!(matrix.values.shape(), &[n, n]);
            assert_eq!(matrix.ids, (0..n).map(|i| format!("g{i}")).collect::<Vec<String>>());
            for i in 0..n {
                for j in 0..n {
                    assert_eq!(matrix.values[[i, j]], matrix.values[[j, i]]);
                }
            }
        }
    }
}
