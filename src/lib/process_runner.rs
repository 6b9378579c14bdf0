use std::process::Command;
use crate::ani_error::AniError;

pub const DEFAULT_SKANI_EXECUTABLE: &str = "skani";

/// Whatever the tool printed, captured as text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

pub trait ToolRunner {
    /*
    Name (or path) of the executable, used as the first token of the built command.
     */
    fn executable(&self) -> &str;

    /*
    Run the command and wait for it. cmd[0] is the executable.
    A non-zero exit status must be reported as AniError::Execution.
     */
    fn run(&self, cmd: &[String]) -> Result<ToolOutput, AniError>;
}

pub fn join_command(cmd: &[String]) -> String {
    cmd.join(" ")
}

/// Runs the tool as a child process, no retries and no timeout.
pub struct SubprocessRunner {
    executable: String,
}

impl SubprocessRunner {
    pub fn new(executable: &str) -> Self {
        Self {
            executable: executable.to_string(),
        }
    }
}

impl Default for SubprocessRunner {
    fn default() -> Self {
        Self::new(DEFAULT_SKANI_EXECUTABLE)
    }
}

impl ToolRunner for SubprocessRunner {
    fn executable(&self) -> &str { &self.executable }

    fn run(&self, cmd: &[String]) -> Result<ToolOutput, AniError> {
        let Some((program, args)) = cmd.split_first() else {
            return Err(AniError::invalid_option("command", "the command to run is empty"));
        };

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| AniError::not_executable(program.as_str(), e))?;

        let captured = ToolOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if output.status.success() {
            Ok(captured)
        } else {
            Err(AniError::Execution {
                tool: self.executable.clone(),
                exit_code: output.status.code(),
                command: join_command(cmd),
                stdout: captured.stdout,
                stderr: captured.stderr,
            })
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use crate::ani_error::AniError;
    use crate::process_runner::{SubprocessRunner, ToolRunner};

    fn sh(script: &str) -> Vec<String> {
        vec!["sh".to_string(), "-c".to_string(), script.to_string()]
    }

    #[test]
    fn test_success_captures_output() {
        let runner = SubprocessRunner::new("sh");
        let output = runner.run(&sh("echo hello; echo progress 1>&2")).unwrap();
        assert_eq!(output.stdout, "hello\n");
        assert_eq!(output.stderr, "progress\n");
    }

    #[test]
    fn test_non_zero_exit() {
        let runner = SubprocessRunner::new("sh");
        let e = runner.run(&sh("echo boom 1>&2; exit 1")).unwrap_err();
        match &e {
            AniError::Execution { exit_code, stderr, command, .. } => {
                assert_eq!(*exit_code, Some(1));
                assert_eq!(stderr, "boom\n");
                assert!(command.starts_with("sh -c "));
            },
            other => panic!("unexpected error {other:?}"),
        }
        let msg = e.to_string();
        assert!(msg.contains("exit code 1"));
        assert!(msg.contains("boom"));
    }

    #[test]
    fn test_missing_executable() {
        let runner = SubprocessRunner::new("skani-that-does-not-exist");
        let e = runner.run(&["skani-that-does-not-exist".to_string(), "triangle".to_string()]).unwrap_err();
        assert!(matches!(e, AniError::NotExecutable { .. }));
    }

    #[test]
    fn test_empty_command() {
        let runner = SubprocessRunner::default();
        assert_eq!(runner.executable(), "skani");
        assert!(runner.run(&[]).is_err());
    }
}
