//! Best score record
//!
//! A single integer that survives between sessions. It is read once when the
//! record is loaded and written only when a run strictly beats it.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, load_json, save_json};

/// Stored form of the record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BestScoreRecord {
    pub score: u64,
}

/// Best score with an optional backing store
pub struct BestScore {
    value: u64,
    store: Option<Box<dyn KeyValueStore>>,
}

impl BestScore {
    pub const STORAGE_KEY: &'static str = "lane_rush_best_score";

    /// Unpersisted best score starting at `value`
    pub fn in_memory(value: u64) -> Self {
        Self { value, store: None }
    }

    /// Read the record from `store`. A missing or unreadable record starts
    /// at 0; later writes still go to the store.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let value = match load_json::<BestScoreRecord>(&*store, Self::STORAGE_KEY) {
            Ok(Some(record)) => {
                log::info!("Loaded best score {}", record.score);
                record.score
            }
            Ok(None) => {
                log::info!("No best score found, starting fresh");
                0
            }
            Err(err) => {
                log::warn!("Ignoring unreadable best score: {}", err);
                0
            }
        };
        Self {
            value,
            store: Some(store),
        }
    }

    pub fn get(&self) -> u64 {
        self.value
    }

    /// Offer a final score. Returns true (and persists) only if it strictly
    /// beats the current best.
    pub fn submit(&mut self, score: u64) -> bool {
        if score <= self.value {
            return false;
        }
        self.value = score;

        if let Some(store) = self.store.as_mut() {
            let record = BestScoreRecord { score };
            match save_json(&mut **store, Self::STORAGE_KEY, &record) {
                Ok(()) => log::info!("Best score saved ({})", score),
                Err(err) => log::warn!("Failed to save best score {}: {}", score, err),
            }
        }
        true
    }

    /// Forget the record, in memory and in the store
    pub fn clear(&mut self) {
        self.value = 0;
        if let Some(store) = self.store.as_mut() {
            match store.remove(Self::STORAGE_KEY) {
                Ok(()) => log::info!("Best score cleared"),
                Err(err) => log::warn!("Failed to clear best score: {}", err),
            }
        }
    }
}

impl std::fmt::Debug for BestScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BestScore")
            .field("value", &self.value)
            .field("persisted", &self.store.is_some())
            .finish()
    }
}
