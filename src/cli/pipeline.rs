//! Pipeline review demo: a single pipeline-engineer agent surveys the
//! project and proposes transformation work.

use kbagent_core::agent::{AgentPersona, AgentRunner};
use kbagent_core::error::BridgeResult;

use crate::cli::Session;

const DEFAULT_OBJECTIVE: &str = "Review the project's tables and propose SQL transformations \
and pipeline improvements";

pub async fn run(objective: Option<String>) -> BridgeResult<()> {
    let objective = objective.unwrap_or_else(|| DEFAULT_OBJECTIVE.to_string());
    let session = Session::establish().await?;

    let tools = session.bridge.bind_all().await?;
    let runner = AgentRunner::new(session.provider.clone(), tools);

    let task = format!(
        "Survey the available buckets and tables, then: {objective}.\n\n\
         Provide practical implementation recommendations."
    );
    let report = runner.run(&AgentPersona::pipeline_engineer(), &task).await?;
    println!("{report}");

    session.close().await
}
