//! `flightdesk ask`: Single-message or interactive mode.
//!
//! One session lives for the whole command, so a Login in an earlier
//! message carries over to later ones in interactive mode.

use flightdesk_agent::{PlannerLoop, PlannerOutcome};
use flightdesk_config::AppConfig;
use flightdesk_core::Session;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run(message: Option<String>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Check for API key early: give a clear error
    if !config.has_api_key() {
        eprintln!();
        eprintln!("  ERROR: No planner API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    FLIGHTDESK_API_KEY=sk-...");
        eprintln!("    OPENAI_API_KEY=sk-...");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let agent = flightdesk_gateway::build_planner_loop(&config)?;
    let session = Session::new();

    if let Some(msg) = message {
        eprint!("  Thinking...");
        let outcome = agent.run(&msg, &session).await;
        eprint!("\r              \r");
        print_outcome(&outcome?, json)?;
        return Ok(());
    }

    println!();
    println!("  FlightDesk — Interactive Mode");
    println!();
    println!("  Backend:     {}", config.backend.base_url);
    println!("  Model:       {}", config.planner.model);
    println!("  Operations:  {}", agent.registry().names().join(", "));
    println!("  Max steps:   {}", agent.max_steps());
    println!();
    println!("  Type your message and press Enter.");
    println!("  Type 'exit' or Ctrl+C to quit.");
    println!();

    interactive(&agent, &session, json).await?;

    println!();
    println!("  Goodbye!");
    println!();
    Ok(())
}

async fn interactive(
    agent: &PlannerLoop,
    session: &Session,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("  You > ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        eprint!("  ...");
        match agent.run(line, session).await {
            Ok(outcome) => {
                eprint!("\r     \r");
                println!();
                print_outcome(&outcome, json)?;
                println!();
            }
            Err(e) => {
                eprint!("\r     \r");
                eprintln!("  [Error] {e}");
                println!();
            }
        }
    }

    Ok(())
}

fn print_outcome(outcome: &PlannerOutcome, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }
    for line in outcome.answer.lines() {
        println!("  FlightDesk > {line}");
    }
    if outcome.stopped_at_limit {
        eprintln!("  (stopped after {} steps)", outcome.iterations);
    }
    Ok(())
}
