//! `flightdesk serve`: Start the HTTP front door.

use flightdesk_config::AppConfig;

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("FlightDesk front door");
    println!("   Listening:    {}:{}", config.gateway.host, config.gateway.port);
    println!("   Backend:      {}", config.backend.base_url);
    println!("   Session mode: {:?}", config.gateway.session_mode);

    flightdesk_gateway::start(config).await?;

    Ok(())
}
