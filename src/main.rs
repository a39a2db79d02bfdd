mod cli;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "kbagent",
    version,
    about = "Agent demos that bridge the Keboola MCP server into LLM tool calling"
)]
struct Cli {
    /// Connect to the MCP server, list the discovered tools, and exit.
    #[arg(long)]
    self_test: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the three-agent analysis crew (explore, analyze, recommend).
    Crew {
        /// Analysis objective handed to every crew task.
        #[arg(long)]
        objective: Option<String>,
    },
    /// Answer a single analysis request with the data analyst agent.
    Analyst {
        /// The question or business problem to analyze.
        request: Option<String>,
    },
    /// Ask the pipeline engineer for transformation recommendations.
    Pipeline {
        /// Optimization objective for the pipeline review.
        #[arg(long)]
        objective: Option<String>,
    },
    /// Interactive analyst session; type 'quit' or 'exit' to leave.
    Interactive,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    kbagent_core::config::platform::load_dotenv();
    init_tracing();

    let cli = Cli::parse();

    let outcome = if cli.self_test {
        cli::tools::run().await
    } else {
        match cli.command {
            None => cli::crew::run(None).await,
            Some(Command::Crew { objective }) => cli::crew::run(objective).await,
            Some(Command::Analyst { request }) => cli::analyst::run(request).await,
            Some(Command::Pipeline { objective }) => cli::pipeline::run(objective).await,
            Some(Command::Interactive) => cli::interactive::run().await,
        }
    };

    if let Err(err) = outcome {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
