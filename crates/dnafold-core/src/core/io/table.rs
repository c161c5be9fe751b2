use crate::core::models::nucleotide::Dinucleotide;
use crate::core::models::rotation_table::{AngleRange, AngleSet, Margin, RotationEntry, RotationTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON parsing error for '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("Unknown dinucleotide code '{0}' in rotation table")]
    UnknownCode(String),
    #[error("Rotation table has no entry for '{0}'")]
    MissingEntry(Dinucleotide),
    #[error("Malformed entry for '{code}': {reason}")]
    MalformedEntry { code: String, reason: String },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
enum RawRange {
    HalfWidth(f64),
    Pair(f64, f64),
}

type RawEntry = (f64, f64, f64, RawRange, RawRange, RawRange);

impl From<RawRange> for AngleRange {
    fn from(raw: RawRange) -> Self {
        match raw {
            RawRange::HalfWidth(r) => AngleRange::Symmetric(r),
            RawRange::Pair(below, above) => AngleRange::Bounded(Margin::new(below, above)),
        }
    }
}

impl From<AngleRange> for RawRange {
    fn from(range: AngleRange) -> Self {
        match range {
            AngleRange::Symmetric(r) => RawRange::HalfWidth(r),
            AngleRange::Bounded(m) => RawRange::Pair(m.below, m.above),
        }
    }
}

impl RotationTable {
    /// Reads a table in the interchange format: a JSON object mapping each
    /// dinucleotide code to `[twist, wedge, direction, twist_range, wedge_range,
    /// direction_range]`, where a range is a half-width or a `[below, above]` pair.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::parse_json(&content, &path.to_string_lossy())
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse_json(content, "<string>")
    }

    fn parse_json(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let raw: BTreeMap<String, RawEntry> =
            serde_json::from_str(content).map_err(|e| ConfigError::Json {
                path: origin.to_string(),
                source: e,
            })?;

        let mut slots: [Option<RotationEntry>; Dinucleotide::COUNT] = [None; Dinucleotide::COUNT];
        for (code, entry) in raw {
            let dinucleotide: Dinucleotide = code
                .parse()
                .map_err(|_| ConfigError::UnknownCode(code.clone()))?;
            slots[dinucleotide.index()] = Some(Self::entry_from_raw(&code, entry)?);
        }

        let mut table = RotationTable::default();
        for dinucleotide in Dinucleotide::ALL {
            *table.entry_mut(dinucleotide) = slots[dinucleotide.index()]
                .ok_or(ConfigError::MissingEntry(dinucleotide))?;
        }
        Ok(table)
    }

    fn entry_from_raw(code: &str, raw: RawEntry) -> Result<RotationEntry, ConfigError> {
        let (twist, wedge, direction, r_twist, r_wedge, r_direction) = raw;
        let ranges = [r_twist, r_wedge, r_direction];
        for range in ranges {
            if let RawRange::HalfWidth(r) = range {
                if r < 0.0 {
                    return Err(ConfigError::MalformedEntry {
                        code: code.to_string(),
                        reason: format!("negative half-range {}", r),
                    });
                }
            }
        }
        Ok(RotationEntry::new(
            AngleSet::new(twist, wedge, direction),
            ranges.map(AngleRange::from),
        ))
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        let raw: BTreeMap<String, RawEntry> = self
            .iter()
            .map(|(dinucleotide, entry)| {
                let [r_twist, r_wedge, r_direction] = entry.ranges.map(RawRange::from);
                (
                    dinucleotide.code(),
                    (
                        entry.angles.twist,
                        entry.angles.wedge,
                        entry.angles.direction,
                        r_twist,
                        r_wedge,
                        r_direction,
                    ),
                )
            })
            .collect();
        serde_json::to_string_pretty(&raw).map_err(|e| ConfigError::Json {
            path: "<string>".to_string(),
            source: e,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = self.to_json_string()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_string_lossy().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, json).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }
}

/// First `{prefix}{i}.json` (i = 1, 2, ...) that does not exist yet.
pub fn next_available_path(prefix: &Path) -> PathBuf {
    let base = prefix.to_string_lossy();
    (1..)
        .map(|i| PathBuf::from(format!("{}{}.json", base, i)))
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| PathBuf::from(format!("{}.json", base)))
}
