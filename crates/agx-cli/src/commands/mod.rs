//! CLI command implementations

pub mod curve;
pub mod generate;
pub mod working_space;

use agx_ocio::formation::FormationSettings;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use crate::FormationArgs;

/// Loads formation settings from a YAML file.
pub fn load_settings(path: &Path) -> Result<FormationSettings> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings: {}", path.display()))?;
    FormationSettings::from_yaml(&text)
        .with_context(|| format!("Failed to parse settings: {}", path.display()))
}

fn triplet(values: &[f64], flag: &str) -> Result<[f64; 3]> {
    values
        .try_into()
        .with_context(|| format!("--{flag} takes exactly 3 values, got {}", values.len()))
}

impl FormationArgs {
    /// Defaults, overridden by the settings file, overridden by flags.
    pub fn resolve(&self) -> Result<FormationSettings> {
        let mut s = match &self.settings {
            Some(path) => load_settings(path)?,
            None => FormationSettings::default(),
        };

        let scalars = [
            (self.exponent_toe, &mut s.exponent_toe),
            (self.exponent_shoulder, &mut s.exponent_shoulder),
            (self.fulcrum_slope, &mut s.fulcrum_slope),
            (self.fulcrum_input, &mut s.fulcrum_input),
            (self.fulcrum_output, &mut s.fulcrum_output),
            (self.limit_low, &mut s.limit_low),
            (self.limit_high, &mut s.limit_high),
            (self.tinting_outset, &mut s.tinting_outset),
            (self.tinting_rotate, &mut s.tinting_rotate),
        ];
        for (flag, field) in scalars {
            if let Some(v) = flag {
                *field = v;
            }
        }

        if let Some(v) = &self.primaries_inset {
            s.primaries_inset = triplet(v, "primaries_inset")?;
        }
        if let Some(v) = &self.primaries_outset {
            s.primaries_outset = Some(triplet(v, "primaries_outset")?);
        }
        if let Some(v) = &self.primaries_rotate {
            s.primaries_rotate = triplet(v, "primaries_rotate")?;
        }

        debug!(settings = ?s, "Resolved formation settings");
        Ok(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("look.yaml");
        std::fs::write(&path, "fulcrum_slope: 2.0\nexponent_toe: 3.0\n").unwrap();

        let args = FormationArgs {
            settings: Some(path),
            exponent_toe: Some(1.0),
            primaries_rotate: Some(vec![0.0, 1.0, 2.0]),
            ..Default::default()
        };
        let s = args.resolve().unwrap();
        assert_eq!(s.fulcrum_slope, 2.0);
        assert_eq!(s.exponent_toe, 1.0);
        assert_eq!(s.primaries_rotate, [0.0, 1.0, 2.0]);
        assert_eq!(s.limit_low, -10.0);
    }

    #[test]
    fn test_no_flags_is_default() {
        let s = FormationArgs::default().resolve().unwrap();
        assert_eq!(s, FormationSettings::default());
    }

    #[test]
    fn test_bad_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "fulcrum_slope: [1, 2]\n").unwrap();
        let err = load_settings(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse settings"));

        assert!(load_settings(&dir.path().join("missing.yaml")).is_err());
    }

    #[test]
    fn test_wrong_triplet_length() {
        assert!(triplet(&[1.0, 2.0], "primaries_inset").is_err());
        assert_eq!(triplet(&[1.0, 2.0, 3.0], "x").unwrap(), [1.0, 2.0, 3.0]);
    }
}
