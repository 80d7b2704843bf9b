use std::path::Path;

use bootsecrets_core::scan_references;
use serde::Serialize;

use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::utils::load_config;
use crate::OutputArgs;

#[derive(Serialize)]
struct ReferenceEntry {
    path: String,
    name: String,
    version: String,
    #[serde(rename = "type")]
    type_tag: String,
}

#[derive(Serialize)]
struct CheckResult {
    valid: bool,
    references: Vec<ReferenceEntry>,
    unique_secrets: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub async fn check_cmd(path: &Path, output: OutputArgs) -> i32 {
    let raw = match load_config(path, &output) {
        Ok(node) => node,
        Err(code) => return code,
    };

    match scan_references(&raw) {
        Ok(report) => {
            let unique_secrets = report.unique_keys().len();
            let references: Vec<ReferenceEntry> = report
                .references
                .iter()
                .map(|r| ReferenceEntry {
                    path: r.path.to_string(),
                    name: r.reference.name.clone(),
                    version: r.reference.version.to_string(),
                    type_tag: r.reference.type_tag.to_string(),
                })
                .collect();

            if output.format == OutputFormat::Text && !output.quiet {
                for r in &references {
                    println!("{}\t{}@{}\t{}", r.path, r.name, r.version, r.type_tag);
                }
                println!(
                    "ok: {} reference(s), {} unique secret(s)",
                    references.len(),
                    unique_secrets
                );
            } else {
                let result = CheckResult {
                    valid: true,
                    references,
                    unique_secrets,
                    error: None,
                };
                print_result(output.format, output.quiet, &result);
            }
            exit_codes::SUCCESS
        }
        Err(err) => {
            if output.format == OutputFormat::Text {
                print_error(output.format, output.quiet, &err.to_string());
            } else {
                let result = CheckResult {
                    valid: false,
                    references: vec![],
                    unique_secrets: 0,
                    error: Some(err.to_string()),
                };
                print_result(output.format, output.quiet, &result);
            }
            exit_codes::INVALID_CONFIG
        }
    }
}
