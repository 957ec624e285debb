//! `upload` and `download` tools

use tracing::{debug, info};

use super::context::{close_sftp, open_sftp, ToolContext};
use super::params::{DownloadParams, UploadParams};
use crate::error::{Result, SshMcpError};
use crate::paths::expand_tilde;

/// Copy a local file to the remote host over SFTP
pub async fn upload(ctx: &ToolContext, params: UploadParams) -> Result<String> {
    let record = ctx.connection(&params.connection_id).await?;
    let local = expand_tilde(&params.local_path);

    if !tokio::fs::try_exists(&local).await.unwrap_or(false) {
        return Err(SshMcpError::LocalFileNotFound(local.display().to_string()));
    }

    let sftp = open_sftp(&record).await?;
    let result = sftp
        .put(&local, &params.remote_path)
        .await
        .map_err(|e| SshMcpError::transfer(format!("{:#}", e)));
    close_sftp(sftp.as_ref()).await;
    result?;

    info!(
        "Uploaded {} to {}:{}",
        local.display(),
        record.endpoint.host,
        params.remote_path
    );
    Ok(format!(
        "Successfully uploaded {} to {}",
        local.display(),
        params.remote_path
    ))
}

/// Copy a remote file to the local filesystem over SFTP, creating missing
/// local parent directories first
pub async fn download(ctx: &ToolContext, params: DownloadParams) -> Result<String> {
    let record = ctx.connection(&params.connection_id).await?;
    let local = expand_tilde(&params.local_path);

    if let Some(parent) = local.parent().filter(|p| !p.as_os_str().is_empty()) {
        debug!("Ensuring local directory {} exists", parent.display());
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            SshMcpError::transfer(format!(
                "Failed to create local directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let sftp = open_sftp(&record).await?;
    let result = sftp
        .get(&params.remote_path, &local)
        .await
        .map_err(|e| SshMcpError::transfer(format!("{:#}", e)));
    close_sftp(sftp.as_ref()).await;
    result?;

    info!(
        "Downloaded {}:{} to {}",
        record.endpoint.host,
        params.remote_path,
        local.display()
    );
    Ok(format!(
        "Successfully downloaded {} to {}",
        params.remote_path,
        local.display()
    ))
}
