//! `corechat chat` — Direct chat with an OpenAI-compatible endpoint.

use std::sync::Arc;
use corechat_agent::DirectChat;
use corechat_config::AppConfig;
use corechat_providers::OpenAiCompatProvider;

use crate::repl::{self, ReplCommand, CHAT_HELP};

pub async fn run(config: &AppConfig, message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let Some(api_key) = config.direct.api_key.clone() else {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set OPENAI_API_KEY, or add api_key under [direct] in:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    };

    let provider = OpenAiCompatProvider::new("openai", &config.direct.base_url, api_key);
    let mut chat = DirectChat::new(Arc::new(provider), &config.direct.model)
        .with_temperature(config.direct.temperature)
        .with_max_history(config.direct.max_history);

    if let Some(msg) = message {
        chat.send(&msg, repl::print_fragment).await?;
        println!();
        return Ok(());
    }

    println!();
    println!("  corechat chat — direct model mode");
    println!();
    println!("  Endpoint:  {}", config.direct.base_url);
    println!("  Model:     {}", chat.model());
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
            ReplCommand::Help => println!("{CHAT_HELP}"),
            ReplCommand::Message(text) => {
                print!("\nAssistant: ");
                match chat.send(&text, repl::print_fragment).await {
                    Ok(_) => println!("\n"),
                    Err(e) => eprintln!("\n  [Error] {e}\n"),
                }
            }
            _ => println!("  That command is only available in agent mode."),
        }

        repl::prompt("You > ")?;
    }

    println!();
    println!("  Goodbye!");
    Ok(())
}
