//! MCP tools
//!
//! Available tools:
//! - `connect` - Open an SSH session and register it under a connection id
//! - `execute` - Run a shell command on a registered connection
//! - `upload` - Copy a local file to the remote host over SFTP
//! - `download` - Copy a remote file to the local host over SFTP
//! - `list` - List a remote directory over SFTP
//! - `disconnect` - Close a connection and forget its id
//!
//! The [`Dispatcher`] maps tool names to handlers and folds every handler
//! outcome into a `CallToolResult`, setting the error flag on failure.

pub mod connect;
pub mod context;
pub mod disconnect;
pub mod execute;
pub mod list;
pub mod params;
pub mod transfer;

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{Result, SshMcpError};

pub use context::ToolContext;
pub use params::{
    ConnectParams, DisconnectParams, DownloadParams, ExecuteParams, ListParams, UploadParams,
};

/// The tools this server exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Connect,
    Execute,
    Upload,
    Download,
    List,
    Disconnect,
}

impl ToolKind {
    /// Every tool, in the order they are advertised
    pub const ALL: [ToolKind; 6] = [
        ToolKind::Connect,
        ToolKind::Execute,
        ToolKind::Upload,
        ToolKind::Download,
        ToolKind::List,
        ToolKind::Disconnect,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Connect => "connect",
            ToolKind::Execute => "execute",
            ToolKind::Upload => "upload",
            ToolKind::Download => "download",
            ToolKind::List => "list",
            ToolKind::Disconnect => "disconnect",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn description(self) -> &'static str {
        match self {
            ToolKind::Connect => {
                "Connect to an SSH server with a password or private key. \
                 Returns the connection id to use with the other tools."
            }
            ToolKind::Execute => {
                "Execute a shell command on a connected SSH server and return its exit code and output."
            }
            ToolKind::Upload => "Upload a local file to the SSH server over SFTP.",
            ToolKind::Download => "Download a file from the SSH server over SFTP.",
            ToolKind::List => {
                "List a directory on the SSH server. Returns filename, isDirectory, size and modifyTime per entry."
            }
            ToolKind::Disconnect => "Close an SSH connection.",
        }
    }

    /// JSON schema of the tool's arguments
    pub fn input_schema(self) -> JsonObject {
        match self {
            ToolKind::Connect => schema_of::<ConnectParams>(),
            ToolKind::Execute => schema_of::<ExecuteParams>(),
            ToolKind::Upload => schema_of::<UploadParams>(),
            ToolKind::Download => schema_of::<DownloadParams>(),
            ToolKind::List => schema_of::<ListParams>(),
            ToolKind::Disconnect => schema_of::<DisconnectParams>(),
        }
    }

    /// Tool definition advertised through `tools/list`
    pub fn definition(self) -> Tool {
        Tool::new(self.name(), self.description(), Arc::new(self.input_schema()))
    }
}

fn schema_of<T: JsonSchema>() -> JsonObject {
    let schema = schemars::schema_for!(T);
    serde_json::to_value(schema)
        .ok()
        .and_then(|value| value.as_object().cloned())
        .unwrap_or_default()
}

fn parse_params<T: DeserializeOwned>(args: JsonObject) -> Result<T> {
    serde_json::from_value(serde_json::Value::Object(args))
        .map_err(|e| SshMcpError::invalid_params(e.to_string()))
}

/// Routes tool calls to their handlers
#[derive(Debug, Clone)]
pub struct Dispatcher {
    ctx: Arc<ToolContext>,
}

impl Dispatcher {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &Arc<ToolContext> {
        &self.ctx
    }

    /// Definitions of every registered tool
    pub fn tools(&self) -> Vec<Tool> {
        ToolKind::ALL.into_iter().map(ToolKind::definition).collect()
    }

    /// Invoke a tool by name. Never fails: errors come back flagged.
    pub async fn call(&self, name: &str, args: JsonObject) -> CallToolResult {
        debug!("call_tool called: {:?}", name);

        let outcome = match ToolKind::from_name(name) {
            Some(kind) => self.invoke(kind, args).await,
            None => Err(SshMcpError::UnknownTool(name.to_string())),
        };

        match outcome {
            Ok(text) => CallToolResult::success(vec![Content::text(text)]),
            Err(e) => {
                warn!("Tool '{}' failed: {}", name, e);
                CallToolResult::error(vec![Content::text(format!("Error: {}", e))])
            }
        }
    }

    async fn invoke(&self, kind: ToolKind, args: JsonObject) -> Result<String> {
        let ctx = self.ctx.as_ref();
        match kind {
            ToolKind::Connect => connect::connect(ctx, parse_params(args)?).await,
            ToolKind::Execute => execute::execute(ctx, parse_params(args)?).await,
            ToolKind::Upload => transfer::upload(ctx, parse_params(args)?).await,
            ToolKind::Download => transfer::download(ctx, parse_params(args)?).await,
            ToolKind::List => list::list(ctx, parse_params(args)?).await,
            ToolKind::Disconnect => disconnect::disconnect(ctx, parse_params(args)?).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::testing::FakeTransport;
    use serde_json::json;

    fn dispatcher() -> (Dispatcher, Arc<FakeTransport>) {
        let transport = Arc::new(FakeTransport::default());
        let ctx = Arc::new(ToolContext::new(Config::default(), transport.clone()));
        (Dispatcher::new(ctx), transport)
    }

    fn args(value: serde_json::Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    fn text_of(result: &CallToolResult) -> String {
        let value = serde_json::to_value(result).unwrap();
        value["content"]
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(|c| c["text"].as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn is_error(result: &CallToolResult) -> bool {
        result.is_error.unwrap_or(false)
    }

    #[test]
    fn test_tool_names_round_trip() {
        for kind in ToolKind::ALL {
            assert_eq!(ToolKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ToolKind::from_name("exec"), None);
    }

    #[test]
    fn test_definitions_declare_required_params() {
        let (dispatcher, _) = dispatcher();
        let tools = dispatcher.tools();
        assert_eq!(tools.len(), 6);

        let required = |name: &str| -> Vec<String> {
            let tool = tools.iter().find(|t| t.name.as_ref() == name).unwrap();
            let mut names: Vec<String> = tool.input_schema["required"]
                .as_array()
                .unwrap()
                .iter()
                .map(|v| v.as_str().unwrap().to_string())
                .collect();
            names.sort();
            names
        };

        assert_eq!(required("connect"), vec!["host", "username"]);
        assert_eq!(required("execute"), vec!["command", "connectionId"]);
        assert_eq!(
            required("upload"),
            vec!["connectionId", "localPath", "remotePath"]
        );
        assert_eq!(
            required("download"),
            vec!["connectionId", "localPath", "remotePath"]
        );
        assert_eq!(required("list"), vec!["connectionId", "remotePath"]);
        assert_eq!(required("disconnect"), vec!["connectionId"]);
    }

    #[test]
    fn test_connect_schema_lists_optional_params() {
        let schema = ToolKind::Connect.input_schema();
        let properties = schema["properties"].as_object().unwrap();
        for name in [
            "host",
            "port",
            "username",
            "password",
            "privateKeyPath",
            "passphrase",
            "connectionId",
        ] {
            assert!(properties.contains_key(name), "missing {}", name);
        }
        assert_eq!(properties["port"]["default"], json!(22));
        assert!(ToolKind::Connect.definition().description.is_some());
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let (dispatcher, transport) = dispatcher();
        let result = dispatcher.call("reboot", JsonObject::new()).await;
        assert!(is_error(&result));
        assert_eq!(text_of(&result), "Error: Unknown tool: reboot");
        assert_eq!(transport.connect_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_argument_is_flagged_error() {
        let (dispatcher, _) = dispatcher();
        let result = dispatcher
            .call("execute", args(json!({"connectionId": "c1"})))
            .await;
        assert!(is_error(&result));
        assert!(text_of(&result).contains("command"));
    }

    #[tokio::test]
    async fn test_wrong_argument_type_is_flagged_error() {
        let (dispatcher, transport) = dispatcher();
        let result = dispatcher
            .call(
                "connect",
                args(json!({"host": "h", "username": "u", "password": "p", "port": "ssh"})),
            )
            .await;
        assert!(is_error(&result));
        assert!(text_of(&result).starts_with("Error: Invalid parameters"));
        assert_eq!(transport.connect_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_connection_for_every_session_tool() {
        let (dispatcher, _) = dispatcher();
        let calls = [
            ("execute", json!({"connectionId": "ghost", "command": "ls"})),
            (
                "upload",
                json!({"connectionId": "ghost", "localPath": "/etc/hosts", "remotePath": "/tmp/h"}),
            ),
            (
                "download",
                json!({"connectionId": "ghost", "remotePath": "/etc/hosts", "localPath": "/tmp/h"}),
            ),
            ("list", json!({"connectionId": "ghost", "remotePath": "/"})),
            ("disconnect", json!({"connectionId": "ghost"})),
        ];

        for (name, arguments) in calls {
            let result = dispatcher.call(name, args(arguments)).await;
            assert!(is_error(&result), "{} should fail", name);
            assert!(
                text_of(&result).contains("No active SSH connection with id 'ghost'"),
                "{}: {}",
                name,
                text_of(&result)
            );
        }
    }

    #[tokio::test]
    async fn test_connect_execute_disconnect_scenario() {
        let (dispatcher, transport) = dispatcher();

        let result = dispatcher
            .call(
                "connect",
                args(json!({"host": "h", "username": "u", "password": "p", "connectionId": "c1"})),
            )
            .await;
        assert!(!is_error(&result));
        assert!(text_of(&result).contains("c1"));

        let result = dispatcher
            .call(
                "execute",
                args(json!({"connectionId": "c1", "command": "echo hi"})),
            )
            .await;
        assert!(!is_error(&result));
        let text = text_of(&result);
        assert!(text.contains("Exit code: 0"));
        assert!(text.ends_with("hi"));

        let result = dispatcher
            .call("disconnect", args(json!({"connectionId": "c1"})))
            .await;
        assert!(!is_error(&result));
        assert_eq!(transport.session(0).close_count(), 1);

        let result = dispatcher
            .call(
                "execute",
                args(json!({"connectionId": "c1", "command": "echo hi"})),
            )
            .await;
        assert!(is_error(&result));
        assert!(text_of(&result).contains("No active SSH connection"));
        assert_eq!(transport.session(0).commands().len(), 1);
    }

    #[tokio::test]
    async fn test_execute_timeout_is_flagged() {
        let (dispatcher, _) = dispatcher();
        dispatcher
            .call(
                "connect",
                args(json!({"host": "h", "username": "u", "password": "p", "connectionId": "c1"})),
            )
            .await;

        let result = dispatcher
            .call(
                "execute",
                args(json!({"connectionId": "c1", "command": "sleep 30", "timeout": 20})),
            )
            .await;
        assert!(is_error(&result));
        assert_eq!(text_of(&result), "Error: Command timeout after 20ms");
    }
}
