//! Interactive analyst session. One MCP session and one tool catalog
//! serve the whole conversation; each question is an independent
//! signature run.

use dialoguer::Input;
use dialoguer::theme::ColorfulTheme;
use kbagent_core::error::{BridgeError, BridgeResult};

use crate::cli::{Session, analyst};

pub async fn run() -> BridgeResult<()> {
    let session = Session::establish().await?;

    let catalog = session.bridge.discover().await?;
    println!("Connected. {} tools available.", catalog.len());
    println!("Ask a data question, or type 'quit' to leave.\n");

    loop {
        let line: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("you")
            .allow_empty(true)
            .interact_text()
            .map_err(|err| BridgeError::Configuration(format!("terminal input failed: {err}")))?;

        let request = line.trim();
        if request.is_empty() {
            continue;
        }
        if ["quit", "exit", "q"]
            .iter()
            .any(|word| request.eq_ignore_ascii_case(word))
        {
            break;
        }

        match analyst::answer_request(&session, request).await {
            Ok(answer) => println!("\n{answer}\n"),
            // Keep the session alive on per-question failures; only
            // setup problems end the loop.
            Err(err @ BridgeError::Invocation { .. }) => println!("\n{err}\n"),
            Err(err) => return Err(err),
        }
    }

    session.close().await
}
