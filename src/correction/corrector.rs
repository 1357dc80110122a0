//! Corrector trait for the external text-correction boundary.

use crate::error::{Result, ScriptcueError};
use std::io::Write;
use std::process::{Command, Stdio};

/// Trait for external text correction.
///
/// Implementations receive rendered subtitle text and return corrected text.
/// The response is opaque: structure is validated by the caller.
pub trait Corrector: Send + 'static {
    /// Correct the given text.
    fn correct(&mut self, text: &str) -> Result<String>;

    /// Return the name of this corrector for logging.
    fn name(&self) -> &str;
}

/// Corrector that returns its input unchanged.
///
/// Used when no correction service is configured.
pub struct PassthroughCorrector;

impl Corrector for PassthroughCorrector {
    fn correct(&mut self, text: &str) -> Result<String> {
        Ok(text.to_string())
    }

    fn name(&self) -> &str {
        "passthrough"
    }
}

/// Corrector that pipes text through an external command.
///
/// The text goes to the command's stdin; its stdout is the corrected text.
/// Spell checkers, grammar services, and LLM wrappers plug in here.
#[derive(Debug, Clone)]
pub struct CommandCorrector {
    program: String,
    args: Vec<String>,
}

impl CommandCorrector {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from a command line split on whitespace.
    ///
    /// Returns `None` for a blank command line.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect()))
    }

    /// Build from an argv-style list, program first.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.clone(), args.to_vec()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Corrector for CommandCorrector {
    fn correct(&mut self, text: &str) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ScriptcueError::CorrectorNotFound {
                        command: self.program.clone(),
                    }
                } else {
                    ScriptcueError::Correction {
                        message: format!("Failed to execute {}: {}", self.program, e),
                    }
                }
            })?;

        // Feed stdin from a separate thread so a child that writes before it
        // finishes reading cannot block on a full stdout pipe.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = text.to_string();
            std::thread::spawn(move || stdin.write_all(input.as_bytes()))
        });

        let output = child.wait_with_output()?;

        if let Some(handle) = writer {
            match handle.join() {
                Ok(Ok(())) => {}
                // The child may legitimately exit without reading everything.
                Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                Ok(Err(e)) => return Err(e.into()),
                Err(_) => {
                    return Err(ScriptcueError::Correction {
                        message: format!("stdin writer for {} panicked", self.program),
                    });
                }
            }
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScriptcueError::Correction {
                message: format!(
                    "{} failed with status {:?}: {}",
                    self.program,
                    output.status.code(),
                    stderr.trim()
                ),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn name(&self) -> &str {
        &self.program
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_returns_input() {
        let mut corrector = PassthroughCorrector;
        let result = corrector.correct("some text").unwrap();
        assert_eq!(result, "some text");
    }

    #[test]
    fn passthrough_name_is_passthrough() {
        let corrector = PassthroughCorrector;
        assert_eq!(corrector.name(), "passthrough");
    }

    #[test]
    fn corrector_trait_object_is_send() {
        fn assert_send<T: Send + ?Sized>() {}
        assert_send::<Box<dyn Corrector>>();
    }

    #[test]
    fn from_command_line_splits_program_and_args() {
        let corrector = CommandCorrector::from_command_line("  sed -e s/a/b/  ").unwrap();
        assert_eq!(corrector.program(), "sed");
        assert_eq!(corrector.args, vec!["-e", "s/a/b/"]);
        assert!(CommandCorrector::from_command_line("   ").is_none());
    }

    #[test]
    fn from_argv_requires_program() {
        assert!(CommandCorrector::from_argv(&[]).is_none());
        let corrector = CommandCorrector::from_argv(&["cat".to_string()]).unwrap();
        assert_eq!(corrector.name(), "cat");
    }

    #[cfg(unix)]
    #[test]
    fn command_corrector_pipes_through_cat() {
        let mut corrector = CommandCorrector::new("cat", Vec::new());
        let result = corrector.correct("안녕하세요 반갑슴니다\n").unwrap();
        assert_eq!(result, "안녕하세요 반갑슴니다\n");
    }

    #[cfg(unix)]
    #[test]
    fn command_corrector_reports_failure_status() {
        let mut corrector =
            CommandCorrector::new("sh", vec!["-c".to_string(), "exit 3".to_string()]);
        let err = corrector.correct("text").unwrap_err();
        assert!(matches!(err, ScriptcueError::Correction { .. }), "got {err}");
    }

    #[test]
    fn command_corrector_missing_program() {
        let mut corrector = CommandCorrector::new("scriptcue-no-such-corrector-binary", Vec::new());
        let err = corrector.correct("text").unwrap_err();
        assert!(matches!(err, ScriptcueError::CorrectorNotFound { .. }));
    }
}
