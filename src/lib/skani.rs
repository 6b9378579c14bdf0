use std::path::{Path, PathBuf};
use crate::ani_calculator::AniCalculator;
use crate::ani_error::AniError;
use crate::comparison_options::TriangleArgs;
use crate::distance_matrix::DistanceMatrix;
use crate::process_runner::{join_command, ToolOutput, ToolRunner};
use crate::skani_matrix::read_triangle_matrix;

// Floats always keep a fractional part (15.0, not 15), integers print as they are.
fn format_float(value: f64) -> String {
    format!("{value:?}")
}

/*
Build the skani triangle (all-vs-all) command.
Order is fixed: executable, mode and output flags, list and output paths,
value options, boolean flags and the preset last. Options that are None are left out.
 */
pub fn construct_triangle_cmd(executable: &str, fasta_list: &Path, output_file: &Path, args: &TriangleArgs) -> Vec<String> {
    let mut cmd = vec![executable.to_string(), "triangle".to_string(), "-v".to_string(), "--distance".to_string()];

    cmd.extend([
        "-l".to_string(), fasta_list.display().to_string(),
        "-o".to_string(), output_file.display().to_string(),
    ]);

    let params_with_values = [
        ("-t", args.threads.map(|v| v.to_string())),
        ("--min-af", args.min_af.map(format_float)),
        ("-c", args.compression.map(|v| v.to_string())),
        ("-m", args.marker_c.map(|v| v.to_string())),
        ("-s", args.screen.map(format_float)),
    ];
    for (flag, value) in params_with_values {
        if let Some(value) = value {
            cmd.extend([flag.to_string(), value]);
        }
    }

    let boolean_flags = [
        ("--ci", args.ci),
        ("--detailed", args.detailed),
        ("--diagonal", args.diagonal),
        ("--sparse", args.sparse),
        ("--full-matrix", args.full_matrix),
        ("--median", args.median),
        ("--no-learned-ani", args.no_learned_ani),
        ("--robust", args.robust),
        ("--faster-small", args.faster_small),
    ];
    for (flag, value) in boolean_flags {
        if value == Some(true) {
            cmd.push(flag.to_string());
        }
    }

    // The preset's flag is the value itself
    if let Some(preset) = args.preset {
        cmd.push(preset.flag());
    }

    cmd
}

pub struct SkaniTriangle {
    results: PathBuf,
    cmd: Vec<String>,
    output: ToolOutput,
}

impl SkaniTriangle {
    /*
    Run skani triangle on the genomes listed in fasta_list, writing the matrix to output.
     */
    pub fn run(runner: &dyn ToolRunner, fasta_list: &Path, output: &Path, args: &TriangleArgs) -> Result<Self, AniError> {
        let cmd = construct_triangle_cmd(runner.executable(), fasta_list, output, args);
        let tool_output = runner.run(&cmd).map_err(|e| AniError::comparison(join_command(&cmd), e))?;

        Ok(Self {
            results: output.to_path_buf(),
            cmd,
            output: tool_output,
        })
    }

    /*
    Use a precalculated matrix
     */
    pub fn pre_calculated(results: &Path) -> Self {
        Self {
            results: results.to_path_buf(),
            cmd: Vec::new(),
            output: ToolOutput::default(),
        }
    }

    pub fn command(&self) -> &[String] { &self.cmd }
    pub fn tool_output(&self) -> &ToolOutput { &self.output }
}

impl AniCalculator for SkaniTriangle {
    fn distance_matrix(&self) -> Result<DistanceMatrix, AniError> {
        let matrix = read_triangle_matrix(&self.results)?;
        DistanceMatrix::new(matrix.values, matrix.ids)
    }

    fn results_path(&self) -> &Path { self.results.as_path() }
}
