//! `jobscout agent` — Interactive or single-message chat mode.

use std::io::{BufRead, Write};
use std::sync::Arc;

use jobscout_agent::Session;
use jobscout_capabilities::default_registry;
use jobscout_config::AppConfig;
use jobscout_engine::ReasoningEngine;
use jobscout_model::OpenAiCompatModel;

pub async fn run(message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Check for API key early — give a clear error
    let Some(api_key) = config.api_key.clone() else {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    JOBSCOUT_API_KEY = 'sk-...'   (generic)");
        eprintln!("    OPENAI_API_KEY   = 'sk-...'   (for OpenAI direct)");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    };

    // Build the model backend, the capability registry, and the session.
    let model = OpenAiCompatModel::new("openai", &config.api_url, api_key)?;
    let registry = Arc::new(default_registry(&config)?);
    let capabilities: Vec<(String, String)> = registry
        .describe_all()
        .into_iter()
        .map(|(name, description)| (name.to_string(), description.to_string()))
        .collect();

    let engine = ReasoningEngine::new(Arc::new(model), &config.default_model, capabilities)
        .with_temperature(config.default_temperature)
        .with_max_tokens(config.default_max_tokens);
    let mut session = Session::new(engine, registry.clone(), config.max_iterations);

    if let Some(msg) = message {
        // Single message mode
        eprint!("  Thinking...");
        let response = session.handle_request(&msg).await?;
        eprint!("\r             \r");
        println!("{response}");
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║        jobscout Agent — Interactive Mode     ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Model:         {}", config.default_model);
    println!(
        "  Capabilities:  {}",
        registry.names().join(", ")
    );
    println!("  Iterations:    up to {} per request", config.max_iterations);
    println!();
    println!("  Type your request and press Enter.");
    println!("  Type 'exit' or Ctrl+C to quit.");
    println!();

    let stdin = std::io::stdin();
    let mut line = String::new();

    loop {
        print!("  You > ");
        std::io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("exit") {
            break;
        }

        eprint!("  ...");
        match session.handle_request(input).await {
            Ok(response) => {
                eprint!("\r     \r");
                println!();
                for line in response.lines() {
                    println!("  Agent > {line}");
                }
                println!();
            }
            // The session survives a failed request; memory is unchanged.
            Err(e) => {
                eprint!("\r     \r");
                eprintln!("  [Error] {e}");
                println!();
            }
        }
    }

    println!();
    println!("  Goodbye!");
    println!();

    Ok(())
}
