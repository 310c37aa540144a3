use std::io;
use std::process::Stdio;
use std::time::Duration;

use futures_util::{Stream, StreamExt};
use tokio::process::Command;
use tracing::{debug, warn};

use super::lines::line_stream;
use super::{Invocation, JSON_PARSE_FAILURE, OutputMode, ProcessError, RunOutcome};
use crate::instance::{VisualStudioInstance, decode_instances};

/// What the line consumer produced besides the echo.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decoded {
    pub instances: Vec<VisualStudioInstance>,
    pub advisory: Option<String>,
}

/// Drains a line stream, echoing every line through `on_line` first.
///
/// In [`OutputMode::Json`] the lines are also concatenated (no separators)
/// and decoded once the stream ends. A decode failure is not an error: the
/// instance list is empty, `on_line` receives [`JSON_PARSE_FAILURE`] once,
/// and the advisory is returned.
pub async fn consume_lines<S, F>(lines: S, mode: OutputMode, mut on_line: F) -> io::Result<Decoded>
where
    S: Stream<Item = io::Result<String>>,
    F: FnMut(&str),
{
    let mut lines = std::pin::pin!(lines);
    let mut buffer = (mode == OutputMode::Json).then(String::new);

    while let Some(line) = lines.next().await {
        let line = line?;
        on_line(&line);
        if let Some(buffer) = buffer.as_mut() {
            buffer.push_str(&line);
        }
    }

    let Some(buffer) = buffer else {
        return Ok(Decoded::default());
    };

    match decode_instances(&buffer) {
        Ok(instances) => {
            debug!(count = instances.len(), "decoded locator instances");
            Ok(Decoded {
                instances,
                advisory: None,
            })
        }
        Err(e) => {
            debug!(error = %e, bytes = buffer.len(), "locator output is not a JSON instance array");
            on_line(JSON_PARSE_FAILURE);
            Ok(Decoded {
                instances: Vec::new(),
                advisory: Some(JSON_PARSE_FAILURE.to_string()),
            })
        }
    }
}

/// Launches external tools and streams their output.
///
/// A runner carries no per-call state; each [`run`](Self::run) spawns a
/// fresh process. Children are killed if the run is dropped or times out.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner {
    timeout: Option<Duration>,
}

impl ProcessRunner {
    pub const fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Runs `invocation` to completion and returns its exit code along with
    /// any decoded instances.
    ///
    /// Stdout is piped and streamed; stderr is left attached to the terminal.
    pub async fn run<F>(
        &self,
        invocation: &Invocation,
        mode: OutputMode,
        on_line: F,
    ) -> Result<RunOutcome, ProcessError>
    where
        F: FnMut(&str),
    {
        let program = invocation.program_name();
        debug!(command = %invocation, ?mode, "launching external tool");

        let mut child = Command::new(invocation.program())
            .args(invocation.get_args())
            .stdout(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ProcessError::Launch {
                program: program.clone(),
                source,
            })?;

        let stdout = child.stdout.take().ok_or_else(|| ProcessError::Read {
            program: program.clone(),
            source: io::Error::other("stdout was not captured"),
        })?;

        let read_error = |source| ProcessError::Read {
            program: program.clone(),
            source,
        };

        let pipeline = async {
            let decoded = consume_lines(line_stream(stdout), mode, on_line)
                .await
                .map_err(read_error)?;
            let status = child.wait().await.map_err(read_error)?;
            Ok::<_, ProcessError>((decoded, status))
        };

        let (decoded, status) = match self.timeout {
            None => pipeline.await?,
            Some(limit) => {
                let finished = tokio::time::timeout(limit, pipeline).await;
                if let Ok(result) = finished {
                    result?
                } else {
                    if let Err(e) = child.start_kill() {
                        warn!(error = %e, "failed to kill {program} after timeout");
                    }
                    return Err(ProcessError::TimedOut {
                        program,
                        secs: limit.as_secs(),
                    });
                }
            }
        };

        // A signal-terminated child has no exit code.
        let exit_code = status.code().unwrap_or(1);
        debug!(exit_code, "external tool finished");

        Ok(RunOutcome {
            exit_code,
            instances: decoded.instances,
            advisory: decoded.advisory,
        })
    }

    /// Runs a tool's own help invocation and returns its output lines
    /// without the `Usage:` and `Options:` banners.
    pub async fn help_lines(&self, invocation: &Invocation) -> Result<Vec<String>, ProcessError> {
        let mut lines = Vec::new();
        self.run(invocation, OutputMode::Plain, |line| {
            if !is_help_banner(line) {
                lines.push(line.to_string());
            }
        })
        .await?;
        Ok(lines)
    }
}

fn is_help_banner(line: &str) -> bool {
    line.starts_with("Usage:") || line.starts_with("Options:")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use futures_util::stream;

    fn lines(items: &[&str]) -> impl Stream<Item = io::Result<String>> {
        stream::iter(
            items
                .iter()
                .map(|s| Ok(s.to_string()))
                .collect::<Vec<_>>(),
        )
    }

    #[tokio::test]
    async fn test_json_lines_are_echoed_and_decoded() {
        let mut seen = Vec::new();
        let decoded = consume_lines(
            lines(&["[", r#"{"installationPath":"C:\\VS"}"#, "]"]),
            OutputMode::Json,
            |line| seen.push(line.to_string()),
        )
        .await
        .unwrap();

        assert_eq!(seen, ["[", r#"{"installationPath":"C:\\VS"}"#, "]"]);
        assert_eq!(decoded.instances.len(), 1);
        assert_eq!(decoded.instances[0].installation_path, r"C:\VS");
        assert!(decoded.advisory.is_none());
    }

    #[tokio::test]
    async fn test_malformed_json_is_advisory() {
        let mut seen = Vec::new();
        let decoded = consume_lines(lines(&["not json"]), OutputMode::Json, |line| {
            seen.push(line.to_string());
        })
        .await
        .unwrap();

        assert_eq!(seen, ["not json", JSON_PARSE_FAILURE]);
        assert!(decoded.instances.is_empty());
        assert_eq!(decoded.advisory.as_deref(), Some(JSON_PARSE_FAILURE));
    }

    #[tokio::test]
    async fn test_null_fields_do_not_drop_instances() {
        let decoded = consume_lines(
            lines(&["[", r#"{"installationPath":"C:\\VS","description":null}"#, "]"]),
            OutputMode::Json,
            |_| {},
        )
        .await
        .unwrap();

        assert_eq!(decoded.instances.len(), 1);
        assert!(decoded.advisory.is_none());
    }

    #[tokio::test]
    async fn test_plain_mode_only_echoes() {
        let mut seen = Vec::new();
        let decoded = consume_lines(lines(&["[", "]"]), OutputMode::Plain, |line| {
            seen.push(line.to_string());
        })
        .await
        .unwrap();

        assert_eq!(seen, ["[", "]"]);
        assert_eq!(decoded, Decoded::default());
    }

    #[tokio::test]
    async fn test_empty_json_output_is_advisory() {
        let mut count = 0;
        let decoded = consume_lines(lines(&[]), OutputMode::Json, |_| count += 1)
            .await
            .unwrap();

        assert_eq!(count, 1);
        assert!(decoded.advisory.is_some());
    }

    #[tokio::test]
    async fn test_read_error_propagates() {
        let failing = stream::iter(vec![
            Ok("first".to_string()),
            Err(io::Error::other("broken pipe")),
        ]);
        let mut seen = Vec::new();
        let result = consume_lines(failing, OutputMode::Json, |line| {
            seen.push(line.to_string());
        })
        .await;

        assert!(result.is_err());
        assert_eq!(seen, ["first"]);
    }

    #[test]
    fn test_is_help_banner() {
        assert!(is_help_banner("Usage: vswhere.exe [options]"));
        assert!(is_help_banner("Options:"));
        assert!(!is_help_banner("  -all  Finds all instances"));
        assert!(!is_help_banner("  Usage: indented"));
    }

    #[tokio::test]
    async fn test_launch_failure() {
        let runner = ProcessRunner::default();
        let invocation = Invocation::new("/nonexistent/dir/vswhere-missing");
        let err = runner
            .run(&invocation, OutputMode::Plain, |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, ProcessError::Launch { .. }));
        assert!(err.to_string().contains("vswhere-missing"));
    }

    #[cfg(unix)]
    fn sh(script: &str) -> Invocation {
        Invocation::new("sh").arg("-c").arg(script)
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_json_process() {
        let runner = ProcessRunner::default();
        let mut seen = Vec::new();
        let outcome = runner
            .run(
                &sh(r#"printf '[\n{"installationPath":"/opt/vs"}\n]\n'"#),
                OutputMode::Json,
                |line| seen.push(line.to_string()),
            )
            .await
            .unwrap();

        assert_eq!(seen, ["[", r#"{"installationPath":"/opt/vs"}"#, "]"]);
        assert_eq!(outcome.exit_code, 0);
        assert!(outcome.success());
        assert_eq!(outcome.instances.len(), 1);
        assert_eq!(outcome.instances[0].installation_path, "/opt/vs");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_returns_real_exit_code_on_bad_json() {
        let runner = ProcessRunner::default();
        let mut seen = Vec::new();
        let outcome = runner
            .run(&sh("echo 'not json'; exit 3"), OutputMode::Json, |line| {
                seen.push(line.to_string());
            })
            .await
            .unwrap();

        assert_eq!(outcome.exit_code, 3);
        assert!(outcome.instances.is_empty());
        assert_eq!(seen, ["not json", JSON_PARSE_FAILURE]);
        assert_eq!(outcome.advisory.as_deref(), Some(JSON_PARSE_FAILURE));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_plain_preserves_order() {
        let runner = ProcessRunner::default();
        let mut seen = Vec::new();
        let outcome = runner
            .run(&sh("for i in 1 2 3 4 5; do echo line$i; done"), OutputMode::Plain, |line| {
                seen.push(line.to_string());
            })
            .await
            .unwrap();

        assert_eq!(seen, ["line1", "line2", "line3", "line4", "line5"]);
        assert!(outcome.instances.is_empty());
        assert!(outcome.advisory.is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_times_out() {
        let runner = ProcessRunner::new(Some(Duration::from_millis(200)));
        let err = runner
            .run(&sh("sleep 5"), OutputMode::Plain, |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, ProcessError::TimedOut { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_dropping_run_kills_child() {
        let dir = tempfile::TempDir::new().unwrap();
        let marker = dir.path().join("finished");
        let invocation = sh(&format!("sleep 0.4; touch '{}'", marker.display()));

        let runner = ProcessRunner::default();
        let run = runner.run(&invocation, OutputMode::Plain, |_| {});
        assert!(
            tokio::time::timeout(Duration::from_millis(100), run)
                .await
                .is_err()
        );

        tokio::time::sleep(Duration::from_millis(700)).await;
        assert!(!marker.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_help_lines_strip_banners() {
        let runner = ProcessRunner::default();
        let lines = runner
            .help_lines(&sh(
                "echo 'Usage: vswhere.exe [options]'; echo; echo 'Options:'; echo '  -all  Finds all instances'",
            ))
            .await
            .unwrap();
        assert_eq!(lines, ["", "  -all  Finds all instances"]);
    }
}
