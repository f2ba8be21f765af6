//! Shell-backed actions for commands declared with `run`.

use std::env;

use palette_engine::{Action, ActionError};
use tokio::process::Command;
use tracing::info;

/// Shell used when `$SHELL` is unset.
const FALLBACK_SHELL: &str = "/bin/sh";

/// Join stdout and stderr and drop blank lines at both ends.
pub fn combine_output(stdout: &[u8], stderr: &[u8]) -> String {
    let mut combined = String::from_utf8_lossy(stdout).into_owned();
    let err = String::from_utf8_lossy(stderr);
    if !err.is_empty() {
        if !combined.is_empty() && !combined.ends_with('\n') {
            combined.push('\n');
        }
        combined.push_str(&err);
    }
    let lines: Vec<&str> = combined.lines().collect();
    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last = lines.iter().rposition(|l| !l.trim().is_empty());
    match (first, last) {
        (Some(s), Some(e)) => lines[s..=e].join("\n"),
        _ => String::new(),
    }
}

/// An async action that runs `command` through the user's shell.
///
/// A non-zero exit is reported as [`ActionError::Exit`].
pub fn shell_action(command: String) -> Action {
    Action::from_async(move || {
        let command = command.clone();
        async move {
            let shell = env::var("SHELL").unwrap_or_else(|_| FALLBACK_SHELL.to_string());
            info!(%command, "run_shell");
            let output = Command::new(&shell).arg("-c").arg(&command).output().await?;
            let text = combine_output(&output.stdout, &output.stderr);
            if !text.is_empty() {
                info!(%command, output = %text, "shell_output");
            }
            if output.status.success() {
                Ok(())
            } else {
                Err(ActionError::Exit(output.status))
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use palette_engine::{Command as PaletteCommand, Outcome, execute};

    use super::*;

    #[test]
    fn output_is_trimmed_and_joined() {
        assert_eq!(combine_output(b"\n\nhello\n", b"oops\n\n"), "hello\noops");
        assert_eq!(combine_output(b"", b""), "");
        assert_eq!(combine_output(b"a", b"b"), "a\nb");
    }

    #[tokio::test]
    async fn exit_status_maps_to_outcome() {
        let ok = PaletteCommand::new("t", "True").with_action(shell_action("exit 0".into()));
        assert!(execute(&ok).await.is_completed());

        let bad = PaletteCommand::new("f", "False").with_action(shell_action("exit 3".into()));
        match execute(&bad).await {
            Outcome::Failed(ActionError::Exit(status)) => assert_eq!(status.code(), Some(3)),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
