//! `fitrec init` — First-time setup.

use fitrec_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    println!("fitrec — First-Time Setup");
    println!("=========================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("  Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    if config_path.exists() {
        println!("\n  Config already exists at: {}", config_path.display());
        println!("  Edit it manually or delete and re-run init.\n");
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("  Created config.toml at: {}", config_path.display());
        println!("\n  Next steps:");
        println!("  1. Edit {} to point at your search index,", config_path.display());
        println!("     or leave backend = \"fixture\" for the built-in corpus.");
        println!("  2. Set OPENAI_API_KEY to enable image analysis.");
        println!("  3. Run: fitrec recommend --goal weight_loss --age 34\n");
    }

    println!("Setup complete.\n");

    Ok(())
}
