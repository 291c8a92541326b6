//! `fifi ask`: answer one question and exit.

use fifi_core::message::SessionId;

pub async fn run(message: String) -> Result<(), Box<dyn std::error::Error>> {
    let message = message.trim();
    if message.is_empty() {
        return Err("No message provided".into());
    }

    let config = super::load_config()?;
    super::require_api_key(&config)?;
    let assistant = super::build_assistant(&config)?;

    eprint!("  Thinking...");
    let reply = assistant.respond(&SessionId::new(), message).await;
    eprint!("\r              \r");
    println!("{}", reply.text);

    if reply.is_error {
        return Err("The language model request failed".into());
    }
    Ok(())
}
