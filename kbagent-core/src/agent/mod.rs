//! Agent assembly: personas, the tool-calling runner, the sequential
//! crew, and declarative signatures.

pub mod crew;
pub mod persona;
pub mod runner;
pub mod signature;

pub use crew::{Crew, Task, TaskReport, data_analysis_tasks};
pub use persona::AgentPersona;
pub use runner::AgentRunner;
pub use signature::{Field, Signature};
