//! `flightdesk init`: Write a default config file.

use flightdesk_config::AppConfig;

pub fn run(force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("Created config directory: {}", config_dir.display());
    }

    if config_path.exists() && !force {
        println!("Config already exists at: {}", config_path.display());
        println!("   Edit it manually or re-run with --force.");
        return Ok(());
    }

    std::fs::write(&config_path, AppConfig::default_toml())?;
    println!("Created config.toml at: {}", config_path.display());
    println!();
    println!("Next steps:");
    println!("   1. Set backend.base_url (or APIGATEWAY_API_URL) to your flight API");
    println!("   2. Add planner.api_key (or export FLIGHTDESK_API_KEY)");
    println!("   3. Run: flightdesk ask --message \"Find flights from Istanbul to Ankara\"");

    Ok(())
}
