//! Player preferences
//!
//! Menus and the garage screen write these; the session only ever sees the
//! track profile and car they resolve to. Persisted separately from the best
//! score.

use serde::{Deserialize, Serialize};

use crate::config::{CarConfig, TrackId, TrackProfile};
use crate::persistence::{KeyValueStore, load_json, save_json};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Garage ===
    /// Selected track
    pub track: TrackId,
    /// Selected car and upgrades
    pub car: CarConfig,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Continuous engine tone volume (0.0 - 1.0)
    pub engine_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            track: TrackId::Highway,
            car: CarConfig::default(),

            master_volume: 0.8,
            sfx_volume: 1.0,
            engine_volume: 0.5,
            muted: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "lane_rush_settings";

    pub fn track_profile(&self) -> &'static TrackProfile {
        self.track.profile()
    }

    /// Car with upgrade levels clamped to the valid range
    pub fn car(&self) -> CarConfig {
        self.car.clamped()
    }

    /// Load settings, falling back to defaults on a missing or bad record
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match load_json::<Settings>(store, Self::STORAGE_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings");
                settings.sanitized()
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(err) => {
                log::warn!("Ignoring unreadable settings: {}", err);
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match save_json(store, Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(err) => log::warn!("Failed to save settings: {}", err),
        }
    }

    /// Force every field into its valid range
    pub fn sanitized(mut self) -> Self {
        self.car = self.car.clamped();
        self.master_volume = clamp_volume(self.master_volume);
        self.sfx_volume = clamp_volume(self.sfx_volume);
        self.engine_volume = clamp_volume(self.engine_volume);
        self
    }
}

fn clamp_volume(vol: f32) -> f32 {
    if vol.is_nan() { 0.0 } else { vol.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PaintColor;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            track: TrackId::Desert,
            car: CarConfig {
                paint: PaintColor::Green,
                ..Default::default()
            }
            .with_upgrades(2, 1),
            muted: true,
            ..Default::default()
        };
        settings.save(&mut store);
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let mut store = MemoryStore::new();
        store
            .set(Settings::STORAGE_KEY, r#"{"track":"Forest"}"#)
            .unwrap();
        let settings = Settings::load(&store);
        assert_eq!(settings.track, TrackId::Forest);
        assert_eq!(settings.master_volume, 0.8);
    }

    #[test]
    fn test_out_of_range_values_sanitized() {
        let mut store = MemoryStore::new();
        store
            .set(
                Settings::STORAGE_KEY,
                r#"{"car":{"chassis":"Pickup","paint":"Red","decal":"None","engine_level":9,"tire_level":5},"master_volume":3.0}"#,
            )
            .unwrap();
        let settings = Settings::load(&store);
        assert_eq!(settings.car.engine_level, 3);
        assert_eq!(settings.car.tire_level, 3);
        assert_eq!(settings.master_volume, 1.0);
        assert!(settings.car().validate().is_ok());
    }

    #[test]
    fn test_garbage_falls_back_to_default() {
        let mut store = MemoryStore::new();
        store.set(Settings::STORAGE_KEY, "][").unwrap();
        assert_eq!(Settings::load(&store), Settings::default());
    }
}
