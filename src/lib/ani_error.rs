use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AniError {
    #[error("No FASTA files found under '{}'", .root.display())]
    Discovery { root: PathBuf },

    #[error("Failed trying to execute '{executable}'. Make sure it is in your $PATH and you have execution permissions.")]
    NotExecutable {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{}", AniError::format_execution_failure(.tool, .exit_code, .command, .stdout, .stderr))]
    Execution {
        tool: String,
        exit_code: Option<i32>,
        command: String,
        stdout: String,
        stderr: String,
    },

    #[error("Failed to run skani comparison: {source}\nCommand: {command}")]
    Comparison {
        command: String,
        #[source]
        source: Box<AniError>,
    },

    #[error("Failed parsing '{}'{}: {msg}", .path.display(), AniError::format_line_as_detail(.line))]
    Parse {
        path: PathBuf,
        line: Option<usize>,
        msg: String,
    },

    #[error("Invalid distance matrix: {msg}")]
    InvalidMatrix { msg: String },

    #[error("Invalid value for '{name}': {msg}")]
    InvalidOption { name: &'static str, msg: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl AniError {
    #[cold]
    pub fn discovery<P: AsRef<Path>>(root: P) -> Self {
        AniError::Discovery {
            root: root.as_ref().to_path_buf(),
        }
    }

    #[cold]
    pub fn not_executable<E: Into<String>>(executable: E, source: std::io::Error) -> Self {
        AniError::NotExecutable {
            executable: executable.into(),
            source,
        }
    }

    #[cold]
    pub fn comparison<C: Into<String>>(command: C, source: AniError) -> Self {
        AniError::Comparison {
            command: command.into(),
            source: Box::new(source),
        }
    }

    #[cold]
    pub fn parse<P: AsRef<Path>, M: Into<String>>(path: P, line: Option<usize>, msg: M) -> Self {
        AniError::Parse {
            path: path.as_ref().to_path_buf(),
            line,
            msg: msg.into(),
        }
    }

    #[cold]
    pub fn invalid_matrix<M: Into<String>>(msg: M) -> Self {
        AniError::InvalidMatrix { msg: msg.into() }
    }

    #[cold]
    pub fn invalid_option<M: Into<String>>(name: &'static str, msg: M) -> Self {
        AniError::InvalidOption {
            name,
            msg: msg.into(),
        }
    }

    #[cold]
    pub fn io<C: Into<String>>(context: C, source: std::io::Error) -> Self {
        AniError::Io {
            context: context.into(),
            source,
        }
    }

    fn format_execution_failure(tool: &str, exit_code: &Option<i32>, command: &str, stdout: &str, stderr: &str) -> String {
        let mut msg = match exit_code {
            Some(code) => format!("{tool} failed with exit code {code}.\n"),
            None => format!("{tool} was terminated by a signal.\n"),
        };
        msg.push_str(&format!("Command: {command}\n"));
        if !stdout.is_empty() {
            msg.push_str(&format!("stdout:\n{stdout}\n"));
        }
        if !stderr.is_empty() {
            msg.push_str(&format!("stderr:\n{stderr}"));
        }
        msg
    }

    fn format_line_as_detail(line: &Option<usize>) -> String {
        match line {
            Some(l) => format!(" (line {l})"),
            None => String::new(),
        }
    }
}
