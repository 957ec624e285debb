//! `list` tool

use tracing::debug;

use super::context::{close_sftp, open_sftp, ToolContext};
use super::params::ListParams;
use crate::error::{Result, SshMcpError};
use crate::ssh::sftp::to_listing;

/// List a remote directory as a JSON array of
/// `{filename, isDirectory, size, modifyTime}`
pub async fn list(ctx: &ToolContext, params: ListParams) -> Result<String> {
    let record = ctx.connection(&params.connection_id).await?;

    let sftp = open_sftp(&record).await?;
    let entries = sftp
        .read_dir(&params.remote_path)
        .await
        .map_err(|e| SshMcpError::List(format!("{:#}", e)));
    close_sftp(sftp.as_ref()).await;

    let listing = to_listing(entries?);
    debug!("Listed {} entries in {}", listing.len(), params.remote_path);

    serde_json::to_string_pretty(&listing).map_err(|e| SshMcpError::List(e.to_string()))
}
