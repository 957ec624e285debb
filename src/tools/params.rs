//! Parameter types for each tool
//!
//! These drive both argument parsing and the JSON schemas advertised in
//! `tools/list`. Field names are camelCase on the wire.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn default_port() -> u16 {
    22
}

/// Parameters for the `connect` tool
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConnectParams {
    /// Hostname or IP address of the SSH server
    pub host: String,

    /// SSH port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Username to authenticate as
    pub username: String,

    /// Password for password authentication
    pub password: Option<String>,

    /// Path to an OpenSSH private key file; a leading ~ is expanded
    pub private_key_path: Option<String>,

    /// Passphrase for an encrypted private key
    pub passphrase: Option<String>,

    /// Id to register the connection under (generated when omitted)
    pub connection_id: Option<String>,
}

/// Parameters for the `execute` tool
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteParams {
    /// Id returned by `connect`
    pub connection_id: String,

    /// Shell command to execute on the remote server
    pub command: String,

    /// Remote working directory to run the command in
    pub cwd: Option<String>,

    /// Timeout in milliseconds (default 60000)
    pub timeout: Option<u64>,
}

/// Parameters for the `upload` tool
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadParams {
    /// Id returned by `connect`
    pub connection_id: String,

    /// Local file to upload; a leading ~ is expanded
    pub local_path: String,

    /// Destination path on the remote server
    pub remote_path: String,
}

/// Parameters for the `download` tool
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DownloadParams {
    /// Id returned by `connect`
    pub connection_id: String,

    /// File on the remote server to download
    pub remote_path: String,

    /// Local destination; a leading ~ is expanded and missing parent directories are created
    pub local_path: String,
}

/// Parameters for the `list` tool
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Id returned by `connect`
    pub connection_id: String,

    /// Remote directory to list
    pub remote_path: String,
}

/// Parameters for the `disconnect` tool
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DisconnectParams {
    /// Id returned by `connect`
    pub connection_id: String,
}
