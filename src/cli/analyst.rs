//! Single-question data analyst demo driven by a declarative
//! signature.

use kbagent_core::agent::{AgentRunner, Signature};
use kbagent_core::error::BridgeResult;

use crate::cli::Session;

const DEFAULT_REQUEST: &str = "What data do we have in this project, and what could we learn from it?";

pub async fn run(request: Option<String>) -> BridgeResult<()> {
    let request = request.unwrap_or_else(|| DEFAULT_REQUEST.to_string());
    let session = Session::establish().await?;

    let answer = answer_request(&session, &request).await?;
    println!("{answer}");

    session.close().await
}

/// Run one analyst request through the signature: render the prompt,
/// drive the tool loop, extract the labelled result.
pub async fn answer_request(session: &Session, request: &str) -> BridgeResult<String> {
    let signature = Signature::data_analysis();
    let tools = session.bridge.bind_all().await?;
    let runner = AgentRunner::new(session.provider.clone(), tools);

    let raw = runner
        .run(&signature.persona(), &signature.render_prompt(request))
        .await?;
    Ok(signature.parse_output(&raw).to_string())
}
