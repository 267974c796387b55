use std::io::{self, Write};

use redmine_cli::config::Config;
use redmine_cli::{RedmineError, Result};

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

pub fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        let answer = prompt(&format!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        ))?;

        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("Redmine CLI Configuration");
    println!("=========================\n");

    let url = prompt("Enter your Redmine URL (e.g., https://redmine.example.com): ")?;
    if url.is_empty() {
        return Err(RedmineError::MissingEndpoint);
    }

    let api_key = prompt("Enter your API key (My account > API access key): ")?;
    if api_key.is_empty() {
        return Err(RedmineError::MissingApiKey);
    }

    // Create config directory if it doesn't exist
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| RedmineError::ConfigRead {
            path: config_path.clone(),
            source: e,
        })?;
    }

    let config_content = format!("url = {}\napi_key = {}\n", toml_string(&url), toml_string(&api_key));

    std::fs::write(&config_path, config_content).map_err(|e| RedmineError::ConfigRead {
        path: config_path.clone(),
        source: e,
    })?;

    println!("\nConfig saved to {}", config_path.display());
    println!("You can now use 'redmine' commands!");

    Ok(())
}

/// Quote a value as a TOML basic string.
fn toml_string(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}
