//! Declarative task signatures.
//!
//! A signature names its input and output fields and carries the
//! instructions for turning one into the other. Rendering produces the
//! task prompt handed to the runner; parsing pulls the labelled output
//! section back out of the model's answer.

use crate::agent::persona::AgentPersona;

#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub description: String,
}

impl Field {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Signature {
    pub instructions: String,
    pub input: Field,
    pub output: Field,
}

impl Signature {
    pub fn new(instructions: impl Into<String>, input: Field, output: Field) -> Self {
        Self {
            instructions: instructions.into(),
            input,
            output,
        }
    }

    /// Render the task prompt for one input value. The model is asked
    /// to label its final answer with the output field name so
    /// [`Signature::parse_output`] can recover it.
    pub fn render_prompt(&self, input_value: &str) -> String {
        format!(
            "{instructions}\n\n\
             {input_name} ({input_desc}):\n{input_value}\n\n\
             When you have finished, give your final answer under the heading \
             '{output_name}:' followed by {output_desc}.",
            instructions = self.instructions,
            input_name = self.input.name,
            input_desc = self.input.description,
            output_name = self.output.name,
            output_desc = self.output.description,
        )
    }

    /// Extract the labelled output section from the model's answer. A
    /// missing label returns the whole answer; models frequently skip
    /// the heading when the answer is short.
    pub fn parse_output<'a>(&self, answer: &'a str) -> &'a str {
        let label = format!("{}:", self.output.name);
        match answer.find(&label) {
            Some(pos) => answer[pos + label.len()..].trim(),
            None => answer.trim(),
        }
    }

    /// General-purpose data analysis signature used by the analyst
    /// demo.
    pub fn data_analysis() -> Self {
        Self::new(
            "You are an expert data analyst with access to a comprehensive set of \
             Keboola data platform tools. You can explore data, run SQL queries, manage \
             transformations, and analyze any type of data.\n\n\
             Your approach should be:\n\
             1. Understand the user's request thoroughly\n\
             2. Explore available data sources when needed\n\
             3. Use appropriate tools to gather and analyze data\n\
             4. Apply statistical and analytical thinking\n\
             5. Provide clear, actionable insights\n\
             6. Suggest next steps or recommendations\n\n\
             Always be thorough but efficient in your analysis approach.",
            Field::new(
                "user_request",
                "The user's data analysis request, question, or business problem",
            ),
            Field::new(
                "analysis_result",
                "Comprehensive analysis results with findings, insights, and recommendations",
            ),
        )
    }

    /// Persona framing for a signature run.
    pub fn persona(&self) -> AgentPersona {
        AgentPersona::new(
            "a data analysis assistant",
            format!("Produce {}: {}", self.output.name, self.output.description),
            self.instructions.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_input_and_output_fields() {
        let signature = Signature::data_analysis();
        let prompt = signature.render_prompt("Which bucket holds sales data?");
        assert!(prompt.contains("user_request"));
        assert!(prompt.contains("Which bucket holds sales data?"));
        assert!(prompt.contains("analysis_result"));
    }

    #[test]
    fn parse_output_extracts_labelled_section() {
        let signature = Signature::data_analysis();
        let answer = "Let me check.\n\nanalysis_result:\nSales grew 12% quarter over quarter.";
        assert_eq!(
            signature.parse_output(answer),
            "Sales grew 12% quarter over quarter."
        );
    }

    #[test]
    fn parse_output_falls_back_to_whole_answer() {
        let signature = Signature::data_analysis();
        assert_eq!(signature.parse_output("  Two buckets.  "), "Two buckets.");
    }
}
