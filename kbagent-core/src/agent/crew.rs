//! Sequential multi-agent crew.
//!
//! Tasks run in declaration order; each task's output is appended to a
//! shared context that later tasks receive alongside their own
//! description.

use tracing::info;

use crate::agent::persona::AgentPersona;
use crate::agent::runner::AgentRunner;
use crate::error::BridgeResult;

/// One unit of crew work, assigned to a persona.
#[derive(Debug, Clone)]
pub struct Task {
    pub persona: AgentPersona,
    pub description: String,
    pub expected_output: String,
}

impl Task {
    pub fn new(
        persona: AgentPersona,
        description: impl Into<String>,
        expected_output: impl Into<String>,
    ) -> Self {
        Self {
            persona,
            description: description.into(),
            expected_output: expected_output.into(),
        }
    }
}

/// Output of a completed task.
#[derive(Debug, Clone)]
pub struct TaskReport {
    pub role: String,
    pub output: String,
}

/// Runs tasks sequentially over one shared runner.
pub struct Crew {
    runner: AgentRunner,
    tasks: Vec<Task>,
}

impl Crew {
    pub fn new(runner: AgentRunner, tasks: Vec<Task>) -> Self {
        Self { runner, tasks }
    }

    /// Execute every task in order. A failing task aborts the run; the
    /// reports of completed tasks are lost with it, matching one-shot
    /// demo semantics.
    pub async fn kickoff(&self) -> BridgeResult<Vec<TaskReport>> {
        let mut reports: Vec<TaskReport> = Vec::with_capacity(self.tasks.len());

        for (index, task) in self.tasks.iter().enumerate() {
            info!(
                step = index + 1,
                total = self.tasks.len(),
                role = task.persona.role.as_str(),
                "starting crew task"
            );

            let prompt = render_task_prompt(task, &reports);
            let output = self.runner.run(&task.persona, &prompt).await?;
            reports.push(TaskReport {
                role: task.persona.role.clone(),
                output,
            });
        }

        Ok(reports)
    }
}

fn render_task_prompt(task: &Task, prior: &[TaskReport]) -> String {
    let mut prompt = String::new();
    if !prior.is_empty() {
        prompt.push_str("Context from earlier steps:\n\n");
        for report in prior {
            prompt.push_str(&format!("## {}\n{}\n\n", report.role, report.output));
        }
        prompt.push_str("---\n\n");
    }
    prompt.push_str(&task.description);
    prompt.push_str(&format!("\n\nExpected output: {}", task.expected_output));
    prompt
}

/// The three-step analysis crew from the flagship demo: explore, then
/// analyze, then recommend pipeline work.
pub fn data_analysis_tasks(objective: &str) -> Vec<Task> {
    vec![
        Task::new(
            AgentPersona::data_explorer(),
            format!(
                "Explore the Keboola project to understand the data landscape:\n\
                 1. List all available buckets and their purposes\n\
                 2. Identify key tables and their schemas\n\
                 3. Understand data relationships and dependencies\n\
                 4. Assess data freshness and quality\n\n\
                 Analysis objective: {objective}\n\n\
                 Provide a comprehensive overview of the data ecosystem."
            ),
            "Detailed report on data structure, quality, and relationships",
        ),
        Task::new(
            AgentPersona::data_analyst(),
            format!(
                "Based on the data exploration, perform detailed analysis:\n\
                 1. Query relevant datasets to understand data distributions\n\
                 2. Identify key metrics and KPIs\n\
                 3. Look for trends, patterns, and anomalies\n\
                 4. Generate statistical summaries\n\n\
                 Analysis objective: {objective}\n\n\
                 Focus on actionable insights that address the objective."
            ),
            "Data analysis report with insights, trends, and recommendations",
        ),
        Task::new(
            AgentPersona::pipeline_engineer(),
            format!(
                "Create optimized data transformations and recommendations:\n\
                 1. Design SQL transformations to support the analysis\n\
                 2. Suggest data pipeline improvements\n\
                 3. Recommend data quality enhancements\n\
                 4. Propose automation opportunities\n\n\
                 Analysis objective: {objective}\n\n\
                 Provide practical implementation recommendations."
            ),
            "Technical recommendations for data transformations and pipeline optimizations",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_tasks_see_prior_outputs() {
        let task = Task::new(AgentPersona::data_analyst(), "Analyze sales", "A report");
        let prior = vec![TaskReport {
            role: "Data Explorer".to_string(),
            output: "Found buckets sales and hr.".to_string(),
        }];
        let prompt = render_task_prompt(&task, &prior);
        assert!(prompt.contains("Found buckets sales and hr."));
        assert!(prompt.contains("Analyze sales"));
        assert!(prompt.contains("Expected output: A report"));
    }

    #[test]
    fn first_task_has_no_context_preamble() {
        let task = Task::new(AgentPersona::data_explorer(), "Explore", "Overview");
        let prompt = render_task_prompt(&task, &[]);
        assert!(!prompt.contains("Context from earlier steps"));
    }

    #[test]
    fn flagship_demo_has_three_ordered_tasks() {
        let tasks = data_analysis_tasks("revenue trends");
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].persona.role, "Data Explorer");
        assert_eq!(tasks[1].persona.role, "Data Analyst");
        assert_eq!(tasks[2].persona.role, "Pipeline Engineer");
        assert!(tasks.iter().all(|t| t.description.contains("revenue trends")));
    }
}
