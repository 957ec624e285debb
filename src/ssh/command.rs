//! Command execution over SSH
//!
//! Provides the `CommandOutput` struct and the channel reader that fills it.

use russh::client::Msg;
use russh::{Channel, ChannelMsg};
use tracing::debug;

/// Shown when a command produced neither stdout nor stderr
pub const NO_OUTPUT: &str = "(no output)";

/// Output from a command execution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Standard output from the command
    pub stdout: String,

    /// Standard error from the command
    pub stderr: String,

    /// Exit code of the command (if available)
    pub exit_code: Option<u32>,

    /// Signal that terminated the command (if any)
    pub exit_signal: Option<String>,
}

impl CommandOutput {
    /// Create a new empty CommandOutput
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the command succeeded (exit code 0 or no exit code available)
    pub fn success(&self) -> bool {
        self.exit_code.is_none_or(|code| code == 0) && self.exit_signal.is_none()
    }

    /// Primary output: trimmed stdout, else trimmed stderr, else [`NO_OUTPUT`]
    pub fn primary_output(&self) -> &str {
        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            return stdout;
        }
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr;
        }
        NO_OUTPUT
    }

    /// Render the result text returned by the execute tool
    pub fn render(&self) -> String {
        let code = self
            .exit_code
            .map_or_else(|| "unknown".to_string(), |c| c.to_string());
        let mut text = format!("Exit code: {}", code);
        if let Some(ref signal) = self.exit_signal {
            text.push_str(&format!(" (signal: {})", signal));
        }
        text.push_str("\n\n");
        text.push_str(self.primary_output());

        let stdout = self.stdout.trim();
        let stderr = self.stderr.trim();
        if !stdout.is_empty() && !stderr.is_empty() {
            text.push_str("\n--- stderr ---\n");
            text.push_str(stderr);
        }
        text
    }
}

/// Collect output from an exec channel until it closes
///
/// EOF is not treated as the end: the exit status usually arrives after it.
pub async fn collect_channel_output(mut channel: Channel<Msg>) -> CommandOutput {
    let mut output = CommandOutput::new();

    while let Some(msg) = channel.wait().await {
        match msg {
            ChannelMsg::Data { data } => {
                output.stdout.push_str(&String::from_utf8_lossy(&data));
            }
            ChannelMsg::ExtendedData { data, ext } => {
                // ext == 1 is SSH_EXTENDED_DATA_STDERR
                if ext == 1 {
                    output.stderr.push_str(&String::from_utf8_lossy(&data));
                } else {
                    output.stdout.push_str(&String::from_utf8_lossy(&data));
                }
            }
            ChannelMsg::ExitStatus { exit_status } => {
                output.exit_code = Some(exit_status);
            }
            ChannelMsg::ExitSignal { signal_name, .. } => {
                output.exit_signal = Some(format!("{:?}", signal_name));
            }
            ChannelMsg::Close => break,
            _ => {}
        }
    }

    debug!(
        "Command completed: exit_code={:?}, signal={:?}, stdout_len={}, stderr_len={}",
        output.exit_code,
        output.exit_signal,
        output.stdout.len(),
        output.stderr.len()
    );

    output
}
