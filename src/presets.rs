//! Static catalog of exam presets.
//!
//! The table is embedded at compile time from `presets.csv` (`name,minutes`)
//! and parsed once on first access. Row order is display order. The first
//! row is the manual-entry sentinel, selected whenever the user types a
//! duration of their own.

use log::{info, warn};
use once_cell::sync::Lazy;
use serde::Deserialize;

const PRESET_DATA: &str = include_str!("presets.csv");

/// Name of the sentinel preset that stands for a user-typed duration.
pub const MANUAL_ENTRY: &str = "직접 입력";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(rename = "minutes")]
    pub duration_minutes: u32,
}

static CATALOG: Lazy<Vec<Preset>> = Lazy::new(|| read_presets_from_csv_string(PRESET_DATA));

/// Parse preset rows, skipping malformed, non-positive, or duplicate entries.
pub fn read_presets_from_csv_string(csv_content: &str) -> Vec<Preset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_content.as_bytes());

    let mut presets: Vec<Preset> = Vec::new();
    for (line, row) in reader.deserialize::<Preset>().enumerate() {
        let preset = match row {
            Ok(preset) => preset,
            Err(e) => {
                warn!("Skipping preset row {}: {}", line + 2, e);
                continue;
            }
        };
        if preset.duration_minutes == 0 {
            warn!("Skipping preset '{}' with zero duration", preset.name);
            continue;
        }
        if presets.iter().any(|p| p.name == preset.name) {
            warn!("Duplicate preset '{}' on row {}, skipping", preset.name, line + 2);
            continue;
        }
        presets.push(preset);
    }

    info!("Loaded {} exam presets", presets.len());
    presets
}

/// All presets in display order.
pub fn list() -> &'static [Preset] {
    &CATALOG
}

pub fn find(name: &str) -> Option<&'static Preset> {
    CATALOG.iter().find(|preset| preset.name == name)
}
