//! Agent personas: role, goal and backstory rendered into a system
//! prompt.

/// A named agent identity. The three fields render into the system
/// prompt that frames every model call the agent makes.
#[derive(Debug, Clone)]
pub struct AgentPersona {
    pub role: String,
    pub goal: String,
    pub backstory: String,
}

impl AgentPersona {
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
        }
    }

    /// Render the persona as a system prompt.
    pub fn system_prompt(&self) -> String {
        format!(
            "You are {role}. {backstory}\n\nYour goal: {goal}\n\n\
             You have access to Keboola data platform tools. Use them to ground \
             every answer in actual project data rather than assumptions.",
            role = self.role,
            backstory = self.backstory,
            goal = self.goal,
        )
    }

    /// Explores buckets, tables, schemas and relationships.
    pub fn data_explorer() -> Self {
        Self::new(
            "Data Explorer",
            "Discover and explore data structures, schemas, and relationships in Keboola",
            "You are an expert data explorer who understands data architectures and \
             can quickly identify key datasets, their relationships, and data quality issues. \
             You use Keboola's tools to navigate through buckets, tables, and understand data lineage.",
        )
    }

    /// Runs SQL analysis and surfaces insights.
    pub fn data_analyst() -> Self {
        Self::new(
            "Data Analyst",
            "Perform advanced data analysis and generate insights using SQL queries",
            "You are a skilled data analyst who can write complex SQL queries, \
             perform statistical analysis, and identify trends and patterns in data. \
             You use Keboola's query capabilities to extract meaningful insights.",
        )
    }

    /// Designs transformations and pipeline improvements.
    pub fn pipeline_engineer() -> Self {
        Self::new(
            "Pipeline Engineer",
            "Create and optimize data transformations and workflows",
            "You are an expert in data engineering who can design efficient \
             data transformations, create SQL transformations, and optimize data pipelines. \
             You understand best practices for data processing in Keboola.",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_carries_role_goal_and_backstory() {
        let persona = AgentPersona::data_explorer();
        let prompt = persona.system_prompt();
        assert!(prompt.contains("Data Explorer"));
        assert!(prompt.contains(&persona.goal));
        assert!(prompt.contains("data lineage"));
    }
}
