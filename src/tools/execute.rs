//! `execute` tool

use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, warn};

use super::context::ToolContext;
use super::params::ExecuteParams;
use crate::error::{Result, SshMcpError};
use crate::ssh::{sanitize_command, with_working_dir};

/// Run one command and report its exit code and output.
///
/// A non-zero exit is still a successful call. On timeout the exec future
/// is dropped, which releases the channel; the remote process is not killed.
pub async fn execute(ctx: &ToolContext, params: ExecuteParams) -> Result<String> {
    let record = ctx.connection(&params.connection_id).await?;
    let command = sanitize_command(&params.command, ctx.config.max_chars)?;
    let command = with_working_dir(&command, params.cwd.as_deref());
    let timeout_ms = params
        .timeout
        .filter(|ms| *ms > 0)
        .unwrap_or(ctx.config.timeout_ms);

    debug!(
        "Executing on '{}' ({}): {}",
        params.connection_id, record.endpoint, command
    );

    match timeout(
        Duration::from_millis(timeout_ms),
        record.session.exec(&command),
    )
    .await
    {
        Ok(Ok(output)) => {
            if !output.success() {
                debug!(
                    "Command exited with code {:?}, signal {:?}",
                    output.exit_code, output.exit_signal
                );
            }
            Ok(output.render())
        }
        Ok(Err(e)) => Err(SshMcpError::ExecStart(format!("{:#}", e))),
        Err(_) => {
            warn!(
                "Command on '{}' timed out after {}ms",
                params.connection_id, timeout_ms
            );
            Err(SshMcpError::CommandTimeout(timeout_ms))
        }
    }
}
