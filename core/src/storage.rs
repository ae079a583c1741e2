use std::fs::File;
use std::path::Path;

use log::{info, warn};

use crate::error::Result;
use crate::ingest::{parse_fixes_csv, parse_fixes_json};
use crate::models::RunFix;
use crate::types::{HardeningConfig, RunSummary};

/// Leser inn konfig fra disk (JSON).
/// Hvis filen ikke finnes, returneres default-konfig.
pub fn load_config(path: &Path) -> Result<HardeningConfig> {
    if path.exists() {
        let contents = std::fs::read_to_string(path)?;
        let de = &mut serde_json::Deserializer::from_str(&contents);
        let cfg: HardeningConfig = serde_path_to_error::deserialize(de)?;
        info!("config loaded from {}", path.display());
        Ok(cfg)
    } else {
        warn!("config not found at {}, using defaults", path.display());
        Ok(HardeningConfig::default())
    }
}

/// Leser en innspilt fix-strøm. `.csv` → CSV, alt annet → JSON.
pub fn load_fixes(path: &Path) -> Result<Vec<RunFix>> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    let fixes = if is_csv {
        parse_fixes_csv(File::open(path)?)?
    } else {
        parse_fixes_json(&std::fs::read_to_string(path)?)?
    };
    info!("loaded {} fixes from {}", fixes.len(), path.display());
    Ok(fixes)
}

/// Lagrer sammendrag som JSON (pretty-print).
pub fn save_summary(summary: &RunSummary, path: &Path) -> Result<()> {
    std::fs::write(path, summary.to_json()?)?;
    info!("summary saved to {}", path.display());
    Ok(())
}

pub fn save_gpx(gpx: &str, path: &Path) -> Result<()> {
    std::fs::write(path, gpx)?;
    info!("GPX saved to {}", path.display());
    Ok(())
}
