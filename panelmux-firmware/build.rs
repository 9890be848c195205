//! Build script for panelmux-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates panel.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Widest text one panel line can hold
const LINE_LEN: usize = 16;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate panel.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=panel.toml");

    let config_path = Path::new("panel.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: panel.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds panel.toml from the panelmux-firmware       ║\n\
            ║  directory. Restore it or create a new one.                      ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read panel.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in panel.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_timing(&config, &mut errors);
    validate_banner(&config, &mut errors);
    validate_uart(&config, &mut errors);
    validate_producers(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid panel.toml                                       ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=panel.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            // Cut on a char boundary; config values may be non-ASCII
            let truncated = match line.char_indices().nth(61) {
                Some((cut, _)) if line.chars().count() > 64 => format!("{}...", &line[..cut]),
                _ => line.to_string(),
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only the sections the firmware parser knows are allowed
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (name, value) in root {
        if !["timing", "banner", "uart", "producers"].contains(&name.as_str()) {
            errors.push(format!("unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("[{}] must be a table", name));
        }
    }
}

/// Check that `key` in `section` is a positive integer no larger than `max`
fn check_positive(
    config: &toml::Value,
    section: &str,
    key: &str,
    max: i64,
    errors: &mut Vec<String>,
) {
    match config.get(section).and_then(|s| s.get(key)) {
        None => {}
        Some(toml::Value::Integer(v)) if *v > 0 && *v <= max => {}
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be 1-{}", section, key, max));
        }
        Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
    }
}

fn validate_timing(config: &toml::Value, errors: &mut Vec<String>) {
    for key in ["cycle_ms", "hold_ms", "dwell_ms"] {
        check_positive(config, "timing", key, 60_000, errors);
    }
}

fn validate_banner(config: &toml::Value, errors: &mut Vec<String>) {
    for key in ["line0", "line1"] {
        match config.get("banner").and_then(|s| s.get(key)) {
            None => {}
            Some(toml::Value::String(text)) => {
                if text.len() > LINE_LEN {
                    errors.push(format!("[banner] {} longer than {} bytes", key, LINE_LEN));
                }
                if text.contains('"') || text.contains('\\') {
                    errors.push(format!("[banner] {} cannot contain escapes", key));
                }
            }
            Some(_) => errors.push(format!("[banner] {} must be a string", key)),
        }
    }
}

fn validate_uart(config: &toml::Value, errors: &mut Vec<String>) {
    check_positive(config, "uart", "baud", 1_000_000, errors);
}

fn validate_producers(config: &toml::Value, errors: &mut Vec<String>) {
    match config.get("producers").and_then(|s| s.get("temp_alert_c")) {
        None => {}
        Some(toml::Value::Integer(t)) if (-40..=125).contains(t) => {}
        Some(toml::Value::Integer(_)) => {
            errors.push("[producers] temp_alert_c must be -40 to 125".to_string());
        }
        Some(_) => errors.push("[producers] temp_alert_c must be an integer".to_string()),
    }
}
