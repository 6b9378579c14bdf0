//  All-vs-all ANI comparison of a genome collection using skani triangle.

use std::path::Path;
use tempdir::TempDir;
use crate::ani_calculator::AniCalculator;
use crate::ani_error::AniError;
use crate::comparison_options::ComparisonOptions;
use crate::distance_matrix::DistanceMatrix;
use crate::genome_discovery::{find_genomes, write_genome_list};
use crate::logger::{log_event, LogStream};
use crate::process_runner::{join_command, ToolRunner};
use crate::skani::SkaniTriangle;

pub const WORK_DIR_PREFIX: &str = "skani_triangle";
pub const GENOME_LIST_FILE: &str = "genome_list.txt";
pub const OUTPUT_FILE: &str = "skani_output.tsv";

/*
Compare all genomes found under `genomes` against each other.
The genome list and skani's output live in a temporary folder that is removed on every return path.
Blocks until skani is done, there is no timeout.
 */
pub fn compare_seqs(mut log_stream: Option<&mut LogStream>,
                    genomes: &Path,
                    options: &ComparisonOptions,
                    runner: &dyn ToolRunner) -> Result<DistanceMatrix, AniError> {
    options.validate()?;

    let genome_paths = find_genomes(genomes)?;
    log_event(&mut log_stream, &format!("Found {} genomes under '{}'", genome_paths.len(), genomes.display()));

    let work_dir = TempDir::new(WORK_DIR_PREFIX)
        .map_err(|e| AniError::io("Failed to create a temporary folder, your tmp may be full", e))?;
    let list_path = work_dir.path().join(GENOME_LIST_FILE);
    let output_path = work_dir.path().join(OUTPUT_FILE);

    write_genome_list(&genome_paths, &list_path)?;

    log_event(&mut log_stream, "Starting skani triangle");
    let skani = SkaniTriangle::run(runner, &list_path, &output_path, &options.to_triangle_args())?;
    log_event(&mut log_stream, &format!("skani finished: {}", join_command(skani.command())));
    for line in skani.tool_output().stderr.lines().filter(|l| !l.trim().is_empty()) {
        log_event(&mut log_stream, &format!("skani: {line}"));
    }

    let distance_matrix = skani.distance_matrix()?;
    let (rows, columns) = distance_matrix.shape();
    log_event(&mut log_stream, &format!("Parsed a {rows}x{columns} distance matrix from '{}'", skani.results_path().display()));

    work_dir.close().map_err(|e| AniError::io("Failed to remove the temporary folder", e))?;
    Ok(distance_matrix)
}
