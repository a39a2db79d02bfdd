//! The flagship demo: a three-agent crew exploring, analyzing, and
//! recommending pipeline work against the connected project.

use kbagent_core::agent::{AgentRunner, Crew, data_analysis_tasks};
use kbagent_core::error::BridgeResult;

use crate::cli::Session;

const DEFAULT_OBJECTIVE: &str = "Comprehensive data analysis and insights generation";

pub async fn run(objective: Option<String>) -> BridgeResult<()> {
    let objective = objective.unwrap_or_else(|| DEFAULT_OBJECTIVE.to_string());
    let session = Session::establish().await?;

    let tools = session.bridge.bind_all().await?;
    println!("Connected. {} tools available.\n", tools.len());
    println!("Objective: {objective}\n");

    let runner = AgentRunner::new(session.provider.clone(), tools);
    let crew = Crew::new(runner, data_analysis_tasks(&objective));

    let reports = crew.kickoff().await?;
    for (index, report) in reports.iter().enumerate() {
        println!("=== Step {}: {} ===\n", index + 1, report.role);
        println!("{}\n", report.output);
    }

    session.close().await
}
