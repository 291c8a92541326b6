//! `fifi onboard`: first-time setup.

use std::path::Path;

use fifi_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    println!("FIFI: First-Time Setup");
    println!("======================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("Created config directory: {}", config_dir.display());
    } else {
        println!("Config directory exists: {}", config_dir.display());
    }

    if config_path.exists() {
        println!("\nConfig already exists at: {}", config_path.display());
        println!("Edit it manually or delete and re-run onboard.\n");
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("Created config.toml at: {}", config_path.display());
    }

    let defaults = AppConfig::default();
    let corpus_path = Path::new(&defaults.retrieval.corpus_path);

    println!("\nNext steps:");
    println!("   1. Put your OpenAI key in '{}' or set OPENAI_API_KEY", defaults.api_key_file);
    if corpus_path.exists() {
        println!("   2. URL corpus found at {}", corpus_path.display());
    } else {
        println!("   2. Run: fifi crawl   (builds {})", corpus_path.display());
    }
    println!("   3. Run: fifi chat   or   fifi serve\n");

    Ok(())
}
