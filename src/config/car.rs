//! Player car configuration
//!
//! Chassis, paint and decal are cosmetic. Engine and tire levels feed the
//! difficulty curve (see `sim::difficulty`).

use serde::{Deserialize, Serialize};

use crate::consts::MAX_UPGRADE_LEVEL;
use crate::error::ConfigError;
use crate::rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Chassis {
    #[default]
    Sedan,
    Coupe,
    Pickup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaintColor {
    #[default]
    Red,
    Blue,
    Yellow,
    Green,
    White,
    Black,
}

impl PaintColor {
    /// Render color (`0xRRGGBB`)
    pub fn rgb(&self) -> u32 {
        match self {
            PaintColor::Red => rgb(0xe5, 0x39, 0x35),
            PaintColor::Blue => rgb(0x1e, 0x88, 0xe5),
            PaintColor::Yellow => rgb(0xfd, 0xd8, 0x35),
            PaintColor::Green => rgb(0x43, 0xa0, 0x47),
            PaintColor::White => rgb(0xfa, 0xfa, 0xfa),
            PaintColor::Black => rgb(0x21, 0x21, 0x21),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Decal {
    #[default]
    None,
    Stripes,
    Flames,
    Number,
}

/// The player's car for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CarConfig {
    pub chassis: Chassis,
    pub paint: PaintColor,
    pub decal: Decal,
    /// Raises starting speed (0-3)
    #[serde(default)]
    pub engine_level: u8,
    /// Softens acceleration (0-3)
    #[serde(default)]
    pub tire_level: u8,
}

impl CarConfig {
    /// Set upgrade levels, clamping each to the valid range
    pub fn with_upgrades(mut self, engine_level: u8, tire_level: u8) -> Self {
        self.engine_level = engine_level.min(MAX_UPGRADE_LEVEL);
        self.tire_level = tire_level.min(MAX_UPGRADE_LEVEL);
        self
    }

    /// Copy with upgrade levels forced into range
    pub fn clamped(self) -> Self {
        self.with_upgrades(self.engine_level, self.tire_level)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (upgrade, value) in [("engine", self.engine_level), ("tire", self.tire_level)] {
            if value > MAX_UPGRADE_LEVEL {
                return Err(ConfigError::UpgradeLevelOutOfRange {
                    upgrade,
                    value,
                    max: MAX_UPGRADE_LEVEL,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_upgrades_clamps() {
        let car = CarConfig::default().with_upgrades(7, 2);
        assert_eq!(car.engine_level, 3);
        assert_eq!(car.tire_level, 2);
        assert!(car.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let car = CarConfig {
            tire_level: 4,
            ..Default::default()
        };
        assert_eq!(
            car.validate(),
            Err(ConfigError::UpgradeLevelOutOfRange {
                upgrade: "tire",
                value: 4,
                max: 3,
            })
        );
        assert!(car.clamped().validate().is_ok());
    }

    #[test]
    fn test_missing_levels_default_to_zero() {
        let json = r#"{"chassis":"Coupe","paint":"Blue","decal":"Flames"}"#;
        let car: CarConfig = serde_json::from_str(json).unwrap();
        assert_eq!(car.chassis, Chassis::Coupe);
        assert_eq!(car.engine_level, 0);
        assert_eq!(car.tire_level, 0);
    }
}
