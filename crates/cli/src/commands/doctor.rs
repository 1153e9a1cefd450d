//! `fitrec doctor` — Diagnose configuration health.

use fitrec_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("fitrec doctor — configuration diagnostics");
    println!("=========================================\n");

    let mut issues = 0;

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        match AppConfig::load() {
            Ok(config) => {
                println!("  ok   Config file valid");

                match config.search.backend.as_str() {
                    "fixture" => {
                        println!("  ok   Search backend: built-in fixture corpus");
                    }
                    "http" => {
                        if config.search.api_key.is_some() {
                            println!("  ok   Search backend: http (API key set)");
                        } else {
                            println!("  warn Search backend is http but no API key is set");
                            println!("       Set FITREC_SEARCH_API_KEY or search.api_key");
                            issues += 1;
                        }
                    }
                    other => {
                        println!("  fail Unknown search backend '{other}'");
                        issues += 1;
                    }
                }

                if config.vision.enabled {
                    if config.vision.endpoint.is_some() && config.vision.api_key.is_some() {
                        println!("  ok   Vision analysis configured");
                    } else {
                        println!("  warn Vision enabled but endpoint/API key missing;");
                        println!("       image analysis will be skipped");
                    }
                } else {
                    println!("  ok   Vision analysis disabled");
                }

                println!(
                    "  ok   Agent: max_iterations = {}, reflection = {}",
                    config.agent.max_iterations, config.agent.reflection_mode
                );
            }
            Err(e) => {
                println!("  fail Config file invalid: {e}");
                issues += 1;
            }
        }
    } else {
        println!("  warn No config file; defaults in effect. Run `fitrec init`.");
    }

    println!();
    if issues == 0 {
        println!("  All checks passed.");
    } else {
        println!("  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
