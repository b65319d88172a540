//! `corechat agent` — Chat with the hosted agent runtime.

use std::sync::Arc;
use corechat_agent::{resolve_session_id, AgentClient};
use corechat_config::AppConfig;
use corechat_core::session::SessionId;
use corechat_providers::{AgentCoreRuntime, StsIdentity};
use tracing::warn;

use crate::repl::{self, ReplCommand, AGENT_HELP};

pub async fn run(
    config: &AppConfig,
    message: Option<String>,
    model: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(agent_arn) = config.agent_arn.as_deref() else {
        eprintln!();
        eprintln!("  ERROR: No agent runtime configured!");
        eprintln!();
        eprintln!("  Set CORECHAT_AGENT_ARN (or AGENT_ARN), or add agent_arn to:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No agent runtime ARN found. See above for setup instructions.".into());
    };

    let sdk = super::sdk_config(config).await;
    let identity = StsIdentity::new(aws_sdk_sts::Client::new(&sdk));
    let runtime = AgentCoreRuntime::new(aws_sdk_bedrockagentcore::Client::new(&sdk), agent_arn);
    let memory = super::build_memory(config, &sdk)?;

    let client = AgentClient::new(Arc::new(runtime), memory)
        .with_history_window(config.memory.history_limit)
        .with_qualifier(config.runtime.qualifier.clone());
    let session = resolve_session_id(&identity, config.session.min_id_length).await;

    let mut model = model.unwrap_or_else(|| config.models.default.clone());
    if !config.is_known_model(&model) {
        warn!(model = %model, "Model is not listed in models.available");
    }

    if let Some(msg) = message {
        // Single message mode
        client.chat(&msg, &session, Some(model.as_str()), repl::print_fragment).await?;
        println!();
        return Ok(());
    }

    println!();
    println!("  corechat agent — interactive mode");
    println!();
    println!("  Model:     {model}");
    println!("  Memory:    {}", client.memory().backend_name());
    println!("  Session:   {session}");
    println!();
    println!("  Type your message and press Enter. /help lists commands.");
    println!();

    let mut lines = repl::stdin_lines();
    repl::prompt("You > ")?;

    while let Some(line) = lines.recv().await {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("  [Input Error] {e}");
                break;
            }
        };

        match ReplCommand::parse(&line) {
            ReplCommand::Quit => break,
            ReplCommand::Empty => {}
            ReplCommand::Help => println!("{AGENT_HELP}"),
            ReplCommand::Models => super::models::print_models(config, &model),
            ReplCommand::Model(None) => println!("  Current model: {model}"),
            ReplCommand::Model(Some(name)) => match switch_model(config, &mut model, name) {
                Ok(()) => println!("  Switched to {model}"),
                Err(name) => {
                    println!("  Unknown model '{name}'. Use /models to list available models.")
                }
            },
            ReplCommand::Session => println!("  Session: {session}"),
            ReplCommand::History => show_history(&client, &session).await,
            ReplCommand::Message(text) => {
                print!("\n-> ");
                match client.chat(&text, &session, Some(model.as_str()), repl::print_fragment).await {
                    Ok(_) => println!("\n"),
                    Err(e) => eprintln!("\n  [Error] {e}\n"),
                }
            }
        }

        repl::prompt("You > ")?;
    }

    println!();
    println!("  Goodbye!");
    Ok(())
}

/// Make `name` the current model if it is configured; hands it back otherwise.
fn switch_model(config: &AppConfig, current: &mut String, name: String) -> Result<(), String> {
    if !config.is_known_model(&name) {
        return Err(name);
    }
    *current = name;
    Ok(())
}

async fn show_history(client: &AgentClient, session: &SessionId) {
    if !client.memory().is_enabled() {
        println!("  Memory is disabled; no history is stored.");
        return;
    }

    match client.history(session).await {
        Ok(turns) if turns.is_empty() => println!("  No history yet."),
        Ok(turns) => {
            for turn in turns {
                println!("  [{}] {}: {}", turn.timestamp, turn.role, turn.content);
            }
        }
        Err(e) => eprintln!("  [Error] Could not load history: {e}"),
    }
}
