//! Build script for stepdeck-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates stepdeck.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sections understood by the firmware parser
const SECTIONS: [&str; 5] = ["display", "defaults", "latch", "timing", "motion"];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate stepdeck.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=stepdeck.toml");

    let config_path = Path::new("stepdeck.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: stepdeck.toml not found!                                 ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds stepdeck.toml as its configuration.         ║\n\
            ║  Please create one in the stepdeck-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read stepdeck.toml                             ║\n\
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
                ║  ERROR: Invalid TOML syntax in stepdeck.toml                     ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_displays(&config, &mut errors);
    validate_latches(&config, &mut errors);
    validate_numbers(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in stepdeck.toml                   ║\n\
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

    println!("cargo:warning=stepdeck.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only known sections, and no keys outside a section
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (name, value) in root {
        if !value.is_table() {
            errors.push(format!("'{}' must be inside a [section]", name));
        } else if !SECTIONS.contains(&name.as_str()) {
            errors.push(format!("unknown section [{}]", name));
        }
    }
}

/// Display values: integers 0-1000 or one-decimal numbers below 100
fn validate_displays(config: &toml::Value, errors: &mut Vec<String>) {
    for section in ["display", "defaults"] {
        let Some(table) = config.get(section).and_then(|s| s.as_table()) else {
            continue;
        };

        for (key, value) in table {
            if !key.starts_with("display") {
                continue;
            }
            match value {
                toml::Value::Integer(v) if (0..=1000).contains(v) => {}
                toml::Value::Integer(_) => {
                    errors.push(format!("[{}] {} must be 0-1000", section, key));
                }
                toml::Value::Float(v) => {
                    let tenths = v * 10.0;
                    if *v < 0.0 || *v >= 100.0 || (tenths - tenths.round()).abs() > 1e-6 {
                        errors.push(format!(
                            "[{}] {} must be 0.0-99.9 with one decimal",
                            section, key
                        ));
                    }
                }
                _ => errors.push(format!("[{}] {} must be a number", section, key)),
            }
        }
    }

    if let Some(value) = config.get("display").and_then(|d| d.get("brightness")) {
        match value.as_integer() {
            Some(v) if (0..=65535).contains(&v) => {}
            _ => errors.push("[display] brightness must be 0-65535".to_string()),
        }
    }
}

/// Latch flags are booleans
fn validate_latches(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.get("latch").and_then(|s| s.as_table()) else {
        return;
    };

    for (key, value) in table {
        if !value.is_bool() {
            errors.push(format!("[latch] {} must be true or false", key));
        }
    }
}

/// Timing and motion values are non-negative integers, some strictly positive
fn validate_numbers(config: &toml::Value, errors: &mut Vec<String>) {
    const POSITIVE: [&str; 6] = [
        "render_ms",
        "second_ms",
        "countdown_divisor",
        "low_rate_us",
        "high_rate_us",
        "pulse_us",
    ];

    for section in ["timing", "motion"] {
        let Some(table) = config.get(section).and_then(|s| s.as_table()) else {
            continue;
        };

        for (key, value) in table {
            match value.as_integer() {
                Some(v) if v < 0 => {
                    errors.push(format!("[{}] {} must not be negative", section, key));
                }
                Some(0) if POSITIVE.contains(&key.as_str()) => {
                    errors.push(format!("[{}] {} must be greater than 0", section, key));
                }
                Some(_) => {}
                None => errors.push(format!("[{}] {} must be an integer", section, key)),
            }
        }
    }

    if let Some(motion) = config.get("motion") {
        let rate = |key: &str| motion.get(key).and_then(|v| v.as_integer());
        let pulse = rate("pulse_us").unwrap_or(5);
        for key in ["low_rate_us", "high_rate_us"] {
            if let Some(period) = rate(key) {
                if period <= pulse {
                    errors.push(format!("[motion] {} must be longer than pulse_us", key));
                }
            }
        }
    }
}
