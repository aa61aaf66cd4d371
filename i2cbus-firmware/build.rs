//! Build script for i2cbus-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates bus.toml and turns it into compile-time constants

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    generate_bus_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // cortex-m-rt layout, RP2040 boot2 placement, defmt symbol table
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate bus.toml and write `bus_config.rs` into OUT_DIR
fn generate_bus_config() {
    println!("cargo:rerun-if-changed=bus.toml");

    let config_path = Path::new("bus.toml");
    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => panic!("\n  ERROR: failed to read bus.toml: {}\n", e),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => panic!("\n  ERROR: invalid TOML syntax in bus.toml:\n{}\n", e),
    };

    let mut errors = Vec::new();

    let frequency = integer(&config, "bus", "frequency", 1, 1_000_000, &mut errors);
    let sda_pullup = boolean(&config, "bus", "sda_pullup", &mut errors);
    let scl_pullup = boolean(&config, "bus", "scl_pullup", &mut errors);
    let scan_interval_s = integer(&config, "scan", "interval_s", 1, 3600, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n  ERROR: invalid bus.toml\n{}\n",
            errors
                .iter()
                .map(|e| format!("  • {}", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    let generated = format!(
        "// Generated from bus.toml by build.rs\n\
         pub const FREQUENCY: u32 = {frequency};\n\
         pub const SDA_PULLUP: bool = {sda_pullup};\n\
         pub const SCL_PULLUP: bool = {scl_pullup};\n\
         pub const SCAN_INTERVAL_S: u64 = {scan_interval_s};\n"
    );

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("bus_config.rs"), generated).unwrap();
}

/// Read `[section] key` as an integer within `min..=max`
fn integer(
    config: &toml::Value,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) -> i64 {
    match config.get(section).and_then(|s| s.get(key)) {
        Some(toml::Value::Integer(value)) if (min..=max).contains(value) => *value,
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
            min
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            min
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            min
        }
    }
}

/// Read `[section] key` as a boolean
fn boolean(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) -> bool {
    match config.get(section).and_then(|s| s.get(key)) {
        Some(toml::Value::Boolean(value)) => *value,
        Some(_) => {
            errors.push(format!("[{}] {} must be true or false", section, key));
            false
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            false
        }
    }
}
