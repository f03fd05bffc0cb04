//! Show the active configuration, directories, and overlay assets.

use std::path::Path;

use snapbooth_common::config::{config_file_path, AppConfig};

pub fn run(config: AppConfig) -> anyhow::Result<()> {
    println!("Snapbooth Configuration");
    println!("{}", "=".repeat(50));

    let config_path = config_file_path();
    if config_path.exists() {
        println!("[OK] Config file: {}", config_path.display());
    } else {
        println!(
            "[WARN] Config file: {} (missing, using defaults)",
            config_path.display()
        );
    }

    println!(
        "{} Assets dir: {}",
        dir_mark(&config.assets_dir),
        config.assets_dir.display()
    );
    println!(
        "{} Captures dir: {}",
        dir_mark(&config.captures_dir),
        config.captures_dir.display()
    );

    if config.assets_dir.is_dir() {
        let mut names: Vec<String> = std::fs::read_dir(&config.assets_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| {
                name.ends_with(".png") || name.ends_with(".jpg") || name.ends_with(".jpeg")
            })
            .collect();
        names.sort();
        println!("[OK] Overlays available: {}", names.len());
        for name in &names {
            println!("     {name}");
        }
    }

    println!();
    println!("Export defaults:");
    println!(
        "  Format: {} (quality {})",
        config.export.format, config.export.jpeg_quality
    );
    println!("  Upload preset: {}", config.export.upload_preset);

    println!();
    println!(
        "Logging: level={} json={}",
        config.logging.level, config.logging.json
    );
    if let Some(file) = &config.logging.file {
        println!("  Log file: {}", file.display());
    }

    Ok(())
}

fn dir_mark(path: &Path) -> &'static str {
    if path.is_dir() {
        "[OK]"
    } else {
        "[WARN]"
    }
}
