//! Local interpreter adapter. Runs submitted Python source in a subprocess
//! and captures its textual output. Scripts that import a plotting library
//! and call a display function get their display calls stripped and the
//! figure captured to a PNG instead of a viewer window.

use std::io::Write;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::{AppError, Result};

const PLOT_IMPORTS: &[&str] = &["import matplotlib", "import seaborn", "import plotly"];
const DISPLAY_CALL: &str = "show()";

/// Named capability check for the plotting heuristic. Substring matching is
/// brittle but matches what callers actually send; keeping it behind this
/// type means dispatch never looks at the script text itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotCapability {
    pub has_plot_import: bool,
    pub has_display_call: bool,
}

impl PlotCapability {
    pub fn detect(script: &str) -> Self {
        PlotCapability {
            has_plot_import: PLOT_IMPORTS.iter().any(|lib| script.contains(lib)),
            has_display_call: script.contains(DISPLAY_CALL),
        }
    }

    /// True when the script would open a plot viewer and should be captured
    /// to an image instead.
    pub fn renders_plot(&self) -> bool {
        self.has_plot_import && self.has_display_call
    }
}

/// Drops every line containing a display call, leaving the rest untouched.
pub fn strip_display_calls(script: &str) -> String {
    script
        .lines()
        .filter(|line| !line.contains(DISPLAY_CALL))
        .collect::<Vec<_>>()
        .join("\n")
}

pub struct LocalRunner {
    interpreter: String,
}

impl LocalRunner {
    pub fn new(interpreter: &str) -> Self {
        LocalRunner {
            interpreter: interpreter.to_string(),
        }
    }

    /// Runs the script and returns captured stdout, or stderr text when the
    /// interpreter exits non-zero. One attempt, no timeout, no retry.
    pub async fn run(&self, script: &str, stdin: Option<&str>) -> Result<String> {
        let mut script_file = tempfile::Builder::new().suffix(".py").tempfile()?;
        script_file.write_all(script.as_bytes())?;

        let mut child = Command::new(&self.interpreter)
            .arg(script_file.path())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(input) = stdin {
            if let Some(mut handle) = child.stdin.take() {
                handle.write_all(input.as_bytes()).await?;
            }
        } else {
            drop(child.stdin.take());
        }

        let output = child.wait_with_output().await?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if output.status.success() {
            Ok(stdout)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            tracing::warn!("interpreter exited with {}", output.status);
            Ok(if stderr.is_empty() { stdout } else { stderr })
        }
    }

    /// Runs a plotting script under a headless backend and returns the
    /// rendered figure as PNG bytes. The caller strips display calls first.
    pub async fn run_with_plot_capture(&self, script: &str) -> Result<Vec<u8>> {
        let plot_file = tempfile::Builder::new().suffix(".png").tempfile()?;
        let plot_path = plot_file.path().to_string_lossy().into_owned();

        let harness = format!(
            "import matplotlib\n\
             matplotlib.use(\"Agg\")\n\
             {script}\n\
             import matplotlib.pyplot as plt\n\
             plt.savefig(r\"{plot_path}\", format=\"png\")\n"
        );

        let mut script_file = tempfile::Builder::new().suffix(".py").tempfile()?;
        script_file.write_all(harness.as_bytes())?;

        let output = Command::new(&self.interpreter)
            .arg(script_file.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            return Err(AppError::Interpreter(stderr));
        }

        let bytes = tokio::fs::read(plot_file.path()).await?;
        Ok(bytes)
    }
}
