//! `jobscout status` — Show configuration and capability status.

use jobscout_capabilities::default_registry;
use jobscout_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    println!("jobscout Status");
    println!("===============");
    println!("  Config dir:     {}", AppConfig::config_dir().display());
    println!("  Model:          {}", config.default_model);
    println!("  API URL:        {}", config.api_url);
    println!("  Temperature:    {}", config.default_temperature);
    println!("  Max iterations: {}", config.max_iterations);
    println!(
        "  Model API key:  {}",
        if config.api_key.is_some() { "configured" } else { "missing" }
    );
    println!(
        "  SerpApi key:    {}",
        if config.job_search.serpapi_api_key.is_some() { "configured" } else { "missing" }
    );
    println!(
        "  Email sender:   {}",
        config.email.sender_address.as_deref().unwrap_or("missing")
    );
    println!(
        "  SMTP:           {}:{}",
        config.email.smtp_server, config.email.smtp_port
    );

    let registry = default_registry(&config)?;
    println!("\n  Capabilities:");
    for (name, description) in registry.describe_all() {
        println!("    {name} — {description}");
    }

    // Check config file existence
    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("\n  Config file found");
    } else {
        println!("\n  No config file — defaults and environment variables in use");
    }

    Ok(())
}
