//! Command sanitization and quoting utilities
//!
//! Provides functions for validating commands before SSH execution and for
//! composing them with a working directory.

use crate::error::{Result, SshMcpError};

/// Sanitize a command before execution
///
/// This function:
/// - Validates that the command is not empty
/// - Trims whitespace
/// - Checks length against max_chars limit
///
/// # Examples
/// ```
/// use remote_ssh_mcp::ssh::sanitize::sanitize_command;
///
/// let cmd = sanitize_command("  ls -la  ", Some(1000)).unwrap();
/// assert_eq!(cmd, "ls -la");
///
/// // Too long command
/// let result = sanitize_command("a".repeat(100).as_str(), Some(50));
/// assert!(result.is_err());
/// ```
pub fn sanitize_command(command: &str, max_chars: Option<usize>) -> Result<String> {
    let trimmed = command.trim();

    if trimmed.is_empty() {
        return Err(SshMcpError::invalid_params("Command cannot be empty"));
    }

    if let Some(max) = max_chars {
        let len = trimmed.chars().count();
        if len > max {
            return Err(SshMcpError::invalid_params(format!(
                "Command is too long (max {} characters, got {})",
                max, len
            )));
        }
    }

    Ok(trimmed.to_string())
}

/// Wrap a value in single quotes for POSIX shells
///
/// # Example
/// ```
/// use remote_ssh_mcp::ssh::sanitize::shell_quote;
///
/// assert_eq!(shell_quote("it's"), "'it'\"'\"'s'");
/// ```
pub fn shell_quote(value: &str) -> String {
    // 'word' becomes '"'"'word'"'"': close quote, literal quote, reopen
    format!("'{}'", value.replace('\'', "'\"'\"'"))
}

/// Prefix `command` with a `cd` into `cwd` when one is given
pub fn with_working_dir(command: &str, cwd: Option<&str>) -> String {
    match cwd.map(str::trim).filter(|dir| !dir.is_empty()) {
        Some(dir) => format!("cd {} && {}", shell_quote(dir), command),
        None => command.to_string(),
    }
}
