//! `fifi serve`: start the HTTP chat gateway.

use std::sync::Arc;

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = super::load_config()?;
    super::require_api_key(&config)?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    let assistant = super::build_assistant(&config)?;

    println!("FIFI Gateway");
    println!("   Listening: http://{}:{}", config.gateway.host, config.gateway.port);
    println!("   Provider:  {} ({})", assistant.provider_name(), assistant.model());
    println!("   Corpus:    {} URLs", assistant.corpus().len());

    fifi_gateway::start(&config.gateway, Arc::new(assistant)).await?;

    Ok(())
}
