//! Shell command execution for data-link configuration tools.
//!
//! Commands are rendered as full strings by the builders in the
//! per-resource crates and run through `/bin/sh -c`, with every
//! user-supplied operand passed through [`shellquote`] first.
//!
//! # Example
//!
//! ```ignore
//! use dlcfg_common::shell::{self, DLADM_CMD, shellquote};
//!
//! let name = "vlan42";
//! let cmd = format!("{} show-vlan {}", DLADM_CMD, shellquote(name));
//! let result = shell::exec(&cmd).await?;
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::process::Stdio;
use tokio::process::Command;

use crate::error::{DlCfgError, DlCfgResult};

/// Path to the `dladm` data-link administration utility.
pub const DLADM_CMD: &str = "/usr/sbin/dladm";

/// Regex for characters that need escaping in shell double-quotes.
/// Matches: $, `, ", \, and newline
static SHELL_ESCAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([$`"\\\n])"#).expect("Invalid regex pattern"));

/// Quotes an operand for safe use inside a `/bin/sh -c` command string.
///
/// Wraps the string in double quotes and escapes the characters that keep
/// meaning inside them: `$`, backtick, `"`, `\` and newline. Link names
/// come from the caller's declaration, so they are never interpolated
/// unquoted.
///
/// # Example
///
/// ```
/// use dlcfg_common::shell::shellquote;
///
/// assert_eq!(shellquote("vlan42"), "\"vlan42\"");
/// assert_eq!(shellquote("net$0"), "\"net\\$0\"");
/// ```
pub fn shellquote(s: &str) -> String {
    let escaped = SHELL_ESCAPE_RE.replace_all(s, r"\$1");
    format!("\"{}\"", escaped)
}

/// Captured result of one subprocess invocation.
#[derive(Debug, Clone)]
pub struct ExecResult {
    /// The exit code of the command (0 = success).
    pub exit_code: i32,
    /// The captured stdout output.
    pub stdout: String,
    /// The captured stderr output.
    pub stderr: String,
}

impl ExecResult {
    /// Returns true if the command succeeded (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// stdout and stderr folded into one string for log lines.
    pub fn combined_output(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }

    /// Converts a non-zero exit into [`DlCfgError::CommandFailed`],
    /// keeping the captured streams verbatim.
    ///
    /// Mutating callers route their results through this; query callers
    /// inspect [`success`](ExecResult::success) instead, where a non-zero
    /// exit means "resource absent" rather than failure.
    pub fn require_success(self, command: &str) -> DlCfgResult<ExecResult> {
        if self.success() {
            Ok(self)
        } else {
            Err(DlCfgError::CommandFailed {
                command: command.to_string(),
                exit_code: self.exit_code,
                stdout: self.stdout,
                stderr: self.stderr,
            })
        }
    }
}

/// Executes a command asynchronously through `/bin/sh -c`.
///
/// Captures stdout and stderr and never treats a non-zero exit as an
/// error by itself; the caller decides what the exit code means.
///
/// # Returns
///
/// * `Ok(ExecResult)` - The command ran to completion (any exit code)
/// * `Err(DlCfgError::ShellExec)` - The command could not be spawned
pub async fn exec(cmd: &str) -> DlCfgResult<ExecResult> {
    tracing::debug!(command = %cmd, "Executing command");

    let output = Command::new("/bin/sh")
        .arg("-c")
        .arg(cmd)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| DlCfgError::ShellExec {
            command: cmd.to_string(),
            source: e,
        })?;

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

    let result = ExecResult {
        exit_code,
        stdout,
        stderr,
    };

    if result.success() {
        tracing::trace!(command = %cmd, exit_code = exit_code, "Command succeeded");
    } else {
        tracing::debug!(
            command = %cmd,
            exit_code = exit_code,
            stderr = %result.stderr,
            "Command exited non-zero"
        );
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shellquote_simple() {
        assert_eq!(shellquote("simple"), "\"simple\"");
        assert_eq!(shellquote("vlan42"), "\"vlan42\"");
        assert_eq!(shellquote("bnx0"), "\"bnx0\"");
    }

    #[test]
    fn test_shellquote_special_chars() {
        // Dollar sign (variable expansion)
        assert_eq!(shellquote("$HOME"), "\"\\$HOME\"");

        // Backtick (command substitution)
        assert_eq!(shellquote("`whoami`"), "\"\\`whoami\\`\"");

        // Double quote
        assert_eq!(shellquote("say \"hello\""), "\"say \\\"hello\\\"\"");

        // Backslash
        assert_eq!(shellquote("path\\to"), "\"path\\\\to\"");

        // Newline
        assert_eq!(shellquote("line1\nline2"), "\"line1\\\nline2\"");
    }

    #[test]
    fn test_shellquote_injection_attempt() {
        let quoted = shellquote("vlan0; rm -rf /");
        assert_eq!(quoted, "\"vlan0; rm -rf /\"");
    }

    #[test]
    fn test_shellquote_empty() {
        assert_eq!(shellquote(""), "\"\"");
    }

    #[test]
    fn test_exec_result_success() {
        let result = ExecResult {
            exit_code: 0,
            stdout: "output".to_string(),
            stderr: "".to_string(),
        };
        assert!(result.success());
        assert_eq!(result.combined_output(), "output");
    }

    #[test]
    fn test_exec_result_failure() {
        let result = ExecResult {
            exit_code: 1,
            stdout: "".to_string(),
            stderr: "error message".to_string(),
        };
        assert!(!result.success());
        assert_eq!(result.combined_output(), "error message");
    }

    #[test]
    fn test_exec_result_combined() {
        let result = ExecResult {
            exit_code: 0,
            stdout: "stdout".to_string(),
            stderr: "stderr".to_string(),
        };
        assert_eq!(result.combined_output(), "stdout\nstderr");
    }

    #[test]
    fn test_require_success_passes_through() {
        let result = ExecResult {
            exit_code: 0,
            stdout: "created".to_string(),
            stderr: String::new(),
        };
        let checked = result.require_success("dladm create-vlan").unwrap();
        assert_eq!(checked.stdout, "created");
    }

    #[test]
    fn test_require_success_failure() {
        let result = ExecResult {
            exit_code: 2,
            stdout: String::new(),
            stderr: "dladm: link busy".to_string(),
        };
        match result.require_success("dladm delete-vlan") {
            Err(DlCfgError::CommandFailed {
                command,
                exit_code,
                stderr,
                ..
            }) => {
                assert_eq!(command, "dladm delete-vlan");
                assert_eq!(exit_code, 2);
                assert_eq!(stderr, "dladm: link busy");
            }
            other => panic!("Expected CommandFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_exec_echo() {
        let result = exec("echo hello").await.unwrap();
        assert!(result.success());
        assert_eq!(result.stdout, "hello");
    }

    #[tokio::test]
    async fn test_exec_nonzero_is_not_an_error() {
        let result = exec("exit 42").await.unwrap();
        assert!(!result.success());
        assert_eq!(result.exit_code, 42);
    }

    #[tokio::test]
    async fn test_exec_captures_stderr() {
        let result = exec("echo oops >&2; exit 3").await.unwrap();
        assert_eq!(result.exit_code, 3);
        assert_eq!(result.stderr, "oops");
    }
}
