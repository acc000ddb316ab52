//! `flightdesk operations`: List what the planner can do.

use flightdesk_backend::BackendClient;
use flightdesk_config::AppConfig;
use std::sync::Arc;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let backend = Arc::new(BackendClient::from_config(&config.backend)?);
    let registry = flightdesk_operations::default_registry(backend);

    println!("Operations ({}), backend {}:", registry.len(), config.backend.base_url);
    println!();
    for descriptor in registry.descriptors() {
        let fields: Vec<&str> = descriptor.fields.iter().map(|f| f.name).collect();
        println!("  {}", descriptor.name);
        println!("    {}", descriptor.description);
        println!("    fields: {}", fields.join(", "));
        println!();
    }

    Ok(())
}
