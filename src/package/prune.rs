// ABOUTME: Removes non-production dependencies from the staged directory.
// ABOUTME: Runs an external command (npm prune --production by default).

use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use super::PackageError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneCommand {
    program: String,
    args: Vec<String>,
}

impl Default for PruneCommand {
    fn default() -> Self {
        Self {
            program: "npm".to_string(),
            args: vec!["prune".to_string(), "--production".to_string()],
        }
    }
}

impl PruneCommand {
    /// Build from an argv list; `None` if it is empty.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the command with `dir` as its working directory.
    pub async fn run(&self, dir: &Path) -> Result<(), PackageError> {
        tracing::info!(command = %self.display(), dir = %dir.display(), "Pruning dependencies");

        let output = Command::new(&self.program)
            .args(&self.args)
            .current_dir(dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            return Err(PackageError::PruneFailed {
                command: self.display(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}
