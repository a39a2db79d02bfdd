//! Self-test: connect, print the discovered tool catalog, disconnect.
//! Exercises configuration, the MCP handshake, and discovery without
//! spending LLM tokens.

use kbagent_core::error::BridgeResult;

use crate::cli::Session;

pub async fn run() -> BridgeResult<()> {
    let session = Session::establish().await?;

    let catalog = session.bridge.discover().await?;
    println!("Discovered {} tools:\n", catalog.len());
    for tool in catalog.iter() {
        let description = tool
            .description
            .as_deref()
            .unwrap_or("(no description)")
            .lines()
            .next()
            .unwrap_or_default();
        println!("  {:<40} {}", tool.name, description);
    }

    session.close().await
}
