//! Tool bridge behavior over a scripted in-memory transport.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};

use kbagent_core::error::{BridgeError, BridgeResult};
use kbagent_core::mcp::{McpTransport, ToolBridge, ToolDescriptor};

/// Transport that serves a fixed catalog and counts every request.
struct StubTransport {
    catalog: Vec<ToolDescriptor>,
    list_calls: AtomicUsize,
    tool_calls: AtomicUsize,
    fail_listing: Option<BridgeError>,
}

impl StubTransport {
    fn with_catalog(catalog: Vec<ToolDescriptor>) -> Self {
        Self {
            catalog,
            list_calls: AtomicUsize::new(0),
            tool_calls: AtomicUsize::new(0),
            fail_listing: None,
        }
    }
}

#[async_trait]
impl McpTransport for StubTransport {
    async fn list_tools(&self) -> BridgeResult<Vec<ToolDescriptor>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.fail_listing {
            return Err(match err {
                BridgeError::Authentication(msg) => BridgeError::Authentication(msg.clone()),
                BridgeError::Connection(msg) => BridgeError::Connection(msg.clone()),
                other => BridgeError::Connection(other.to_string()),
            });
        }
        Ok(self.catalog.clone())
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> BridgeResult<Value> {
        self.tool_calls.fetch_add(1, Ordering::SeqCst);
        Ok(json!({"tool": name, "echo": arguments}))
    }

    async fn shutdown(&self) -> BridgeResult<()> {
        Ok(())
    }
}

fn sample_catalog() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new("list_buckets", "List storage buckets"),
        ToolDescriptor::new("query_table", "Run a SQL query").with_schema(json!({
            "type": "object",
            "properties": { "sql": { "type": "string" } },
            "required": ["sql"]
        })),
    ]
}

#[tokio::test]
async fn discovery_runs_once_and_is_cached() {
    let transport = Arc::new(StubTransport::with_catalog(sample_catalog()));
    let bridge = ToolBridge::new(transport.clone());

    let first = bridge.discover().await.unwrap();
    let second = bridge.discover().await.unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert_eq!(transport.list_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn duplicate_tool_names_keep_the_first_definition() {
    let catalog = vec![
        ToolDescriptor::new("query_table", "first definition"),
        ToolDescriptor::new("list_buckets", "buckets"),
        ToolDescriptor::new("query_table", "second definition"),
    ];
    let transport = Arc::new(StubTransport::with_catalog(catalog));
    let bridge = ToolBridge::new(transport);

    let tools = bridge.discover().await.unwrap();
    let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["query_table", "list_buckets"]);
    assert_eq!(tools[0].description.as_deref(), Some("first definition"));
}

#[tokio::test]
async fn empty_catalog_is_a_connection_error() {
    let transport = Arc::new(StubTransport::with_catalog(Vec::new()));
    let bridge = ToolBridge::new(transport);

    let err = bridge.discover().await.unwrap_err();
    assert!(matches!(err, BridgeError::Connection(_)));
    assert!(err.to_string().starts_with("ConnectionError:"));
}

#[tokio::test]
async fn auth_failure_during_discovery_keeps_its_kind() {
    let mut transport = StubTransport::with_catalog(Vec::new());
    transport.fail_listing = Some(BridgeError::Authentication(
        "storage token rejected".to_string(),
    ));
    let bridge = ToolBridge::new(Arc::new(transport));

    let err = bridge.discover().await.unwrap_err();
    assert!(err.to_string().starts_with("AuthenticationError:"));
}

#[tokio::test]
async fn binding_an_unknown_tool_fails() {
    let transport = Arc::new(StubTransport::with_catalog(sample_catalog()));
    let bridge = ToolBridge::new(transport);

    let err = bridge.bind(&["does_not_exist"]).await.unwrap_err();
    match err {
        BridgeError::Invocation { tool, .. } => assert_eq!(tool, "does_not_exist"),
        other => panic!("expected invocation error, got {other}"),
    }
}

#[tokio::test]
async fn invoke_passes_arguments_through_unmodified() {
    let transport = Arc::new(StubTransport::with_catalog(sample_catalog()));
    let bridge = ToolBridge::new(transport.clone());

    let tools = bridge.bind(&["query_table"]).await.unwrap();
    let result = tools[0]
        .invoke(json!({"sql": "SELECT * FROM sales"}))
        .await
        .unwrap();

    assert_eq!(result["tool"], "query_table");
    assert_eq!(result["echo"]["sql"], "SELECT * FROM sales");
    assert_eq!(transport.tool_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn schema_violations_fail_locally_without_a_remote_call() {
    let transport = Arc::new(StubTransport::with_catalog(sample_catalog()));
    let bridge = ToolBridge::new(transport.clone());

    let tools = bridge.bind(&["query_table"]).await.unwrap();

    // Missing required property.
    let err = tools[0].invoke(json!({})).await.unwrap_err();
    assert!(matches!(err, BridgeError::Invocation { .. }));
    assert!(err.to_string().contains("sql"));

    // Wrong type.
    let err = tools[0].invoke(json!({"sql": 42})).await.unwrap_err();
    assert!(matches!(err, BridgeError::Invocation { .. }));

    assert_eq!(transport.tool_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn bind_all_exposes_the_whole_catalog() {
    let transport = Arc::new(StubTransport::with_catalog(sample_catalog()));
    let bridge = ToolBridge::new(transport);

    let tools = bridge.bind_all().await.unwrap();
    assert_eq!(tools.len(), 2);
    assert_eq!(tools[0].name(), "list_buckets");
    assert_eq!(tools[1].description(), "Run a SQL query");
}
