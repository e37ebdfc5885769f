use anyhow::{Context, Result};
use seo_forecaster::config::DEMO;
use std::fs;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    build_demo_inputs()
}

fn build_demo_inputs() -> Result<()> {
    let directory = PathBuf::from(DEMO.directory);
    fs::create_dir_all(&directory)
        .with_context(|| format!("Failed to create demo directory {:?}", directory))?;

    let keywords_path = directory.join(DEMO.keywords_filename);
    write_keywords(&keywords_path)?;
    println!(
        "Wrote {} keywords to {:?}",
        DEMO.resources.keywords.len(),
        keywords_path
    );

    let history_path = directory.join(DEMO.history_filename);
    write_history(&history_path)?;
    println!(
        "Wrote {} months of history to {:?}",
        DEMO.resources.history.len(),
        history_path
    );

    println!(
        "✅ Try: seo-forecaster --keywords {:?} --historical {:?} --revenue-per-conversion 85",
        keywords_path, history_path
    );
    Ok(())
}

fn write_keywords(path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {:?}", path))?;
    writer.write_record(["keyword", "currentPosition", "targetPosition", "searchVolume"])?;
    for (keyword, current, target, volume) in DEMO.resources.keywords {
        writer.write_record([
            keyword.to_string(),
            current.to_string(),
            target.to_string(),
            volume.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_history(path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {:?}", path))?;
    writer.write_record(["date", "sessions", "conversions"])?;
    for (date, sessions, conversions) in DEMO.resources.history {
        writer.write_record([date.to_string(), sessions.to_string(), conversions.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}
