use bootsecrets_core::{to_json_value, to_yaml_value, ConfigNode};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

pub fn print_result<T: Serialize>(format: OutputFormat, quiet: bool, result: &T) {
    if quiet {
        return;
    }
    match format {
        OutputFormat::Text => {
            if let Ok(json) = serde_json::to_string_pretty(result) {
                println!("{json}");
            }
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string(result) {
                println!("{json}");
            }
        }
        OutputFormat::Yaml => {
            if let Ok(yaml) = serde_yaml::to_string(result) {
                print!("{yaml}");
            }
        }
    }
}

pub fn print_error(format: OutputFormat, quiet: bool, message: &str) {
    if quiet {
        return;
    }
    match format {
        OutputFormat::Json => {
            let err = serde_json::json!({"error": message});
            eprintln!("{}", serde_json::to_string(&err).unwrap_or_default());
        }
        OutputFormat::Text | OutputFormat::Yaml => eprintln!("error: {message}"),
    }
}

/// Render a configuration tree. Text and YAML keep `!tuple`/`!atom` tags;
/// JSON flattens them.
pub fn render_config(format: OutputFormat, node: &ConfigNode) -> Result<String, String> {
    match format {
        OutputFormat::Text | OutputFormat::Yaml => {
            serde_yaml::to_string(&to_yaml_value(node)).map_err(|e| e.to_string())
        }
        OutputFormat::Json => serde_json::to_string_pretty(&to_json_value(node))
            .map(|s| s + "\n")
            .map_err(|e| e.to_string()),
    }
}
