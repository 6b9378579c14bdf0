use std::io::{BufWriter, Write};
use std::process::ExitCode;

extern crate SkaniTriangleLib;

use SkaniTriangleLib::ani_calculator::AniCalculator;
use SkaniTriangleLib::ani_error::AniError;
use SkaniTriangleLib::cli::{Usage, UserTask};
use SkaniTriangleLib::compare::compare_seqs;
use SkaniTriangleLib::distance_matrix::DistanceMatrix;
use SkaniTriangleLib::logger::{log_event, LogStream};
use SkaniTriangleLib::process_runner::SubprocessRunner;
use SkaniTriangleLib::skani::SkaniTriangle;

fn compute_task(usage: &Usage, log_stream: Option<&mut LogStream>) -> Result<(), AniError> {
    let mut log_stream = log_stream;

    let distance_matrix: DistanceMatrix = match usage.get_task() {
        UserTask::Triangle => {
            let options = usage.get_comparison_options().cloned().unwrap_or_default();
            let runner = SubprocessRunner::new(usage.get_skani());
            compare_seqs(log_stream.as_deref_mut(), usage.get_input(), &options, &runner)?
        },
        UserTask::Convert => {
            log_event(&mut log_stream, &format!("Reading skani matrix '{}'", usage.get_input().display()));
            SkaniTriangle::pre_calculated(usage.get_input()).distance_matrix()?
        },
    };

    distance_matrix.save(usage.get_out_file())?;
    log_event(&mut log_stream, &format!("Wrote {} genomes to '{}'", distance_matrix.len(), usage.get_out_file().display()));
    Ok(())
}

fn main() -> ExitCode {
    let usage = Usage::new();

    let mut log_stream = if usage.get_print_statistics() {
        Some(BufWriter::new(Box::new(std::io::stderr()) as Box<dyn Write>))
    } else {
        None
    };

    log_event(&mut log_stream.as_mut(), &format!("SkaniTriangle, {}", usage.get_version()));
    log_event(&mut log_stream.as_mut(), "Starting");

    match compute_task(&usage, log_stream.as_mut()) {
        Ok(()) => {
            log_event(&mut log_stream.as_mut(), "Done");
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("E: {e}");
            ExitCode::FAILURE
        },
    }
}
