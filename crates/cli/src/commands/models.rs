//! `corechat models` — List the configured models.

use corechat_config::AppConfig;

pub fn run(config: &AppConfig) {
    print_models(config, &config.models.default);
}

/// Print the available models, marking `current`.
pub fn print_models(config: &AppConfig, current: &str) {
    println!("  Available models:");
    for name in &config.models.available {
        let marker = if name == current { "*" } else { " " };
        println!("  {marker} {name}");
    }
}
