//! Persistence adapter: one JSON record on disk holding the whole wheel
//! state (active roster, drawn set, history, rotation, saved classes).
//!
//! The record uses camelCase keys and every field is optional on load, so
//! older or hand-edited files keep working. Saves are fire-and-forget from
//! the caller's point of view: a failure is reported and logged, never
//! rolled back.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::WheelError;
use crate::wheel::{ClassBook, Roster, SavedClass, WheelEngine};

/// The persisted record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WheelData {
    pub entries: Vec<String>,
    pub drawn_entries: Vec<String>,
    pub draw_history: Vec<String>,
    pub rotation: f64,
    /// Absent in records written before the mode existed; the config
    /// default applies then.
    pub no_repeat: Option<bool>,
    pub named_lists: BTreeMap<String, NamedListData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NamedListData {
    pub entries: Vec<String>,
    pub saved_at: String,
}

impl WheelData {
    /// Snapshot an engine for saving.
    pub fn capture(engine: &WheelEngine) -> Self {
        let named_lists = engine
            .classes()
            .names()
            .filter_map(|name| {
                engine.classes().get(name).map(|class| {
                    (
                        name.to_string(),
                        NamedListData {
                            entries: class.entries.clone(),
                            saved_at: class.saved_at.clone(),
                        },
                    )
                })
            })
            .collect();

        Self {
            entries: engine.roster().entries().to_vec(),
            drawn_entries: engine.roster().drawn().to_vec(),
            draw_history: engine.roster().history().to_vec(),
            rotation: engine.rotation(),
            no_repeat: Some(engine.no_repeat()),
            named_lists,
        }
    }

    /// Rebuild an engine from this record. Every loaded string is trimmed
    /// and empties are dropped; `no_repeat` falls back to the config
    /// default when the record predates the field.
    pub fn into_engine(
        self,
        spin_duration: std::time::Duration,
        no_repeat_default: bool,
    ) -> WheelEngine {
        let roster = Roster::from_parts(self.entries, self.drawn_entries, self.draw_history);

        let mut classes = ClassBook::new();
        for (name, list) in self.named_lists {
            let entries: Vec<String> = list
                .entries
                .into_iter()
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty())
                .collect();
            classes.insert_raw(
                name,
                SavedClass {
                    entries,
                    saved_at: list.saved_at.trim().to_string(),
                },
            );
        }

        WheelEngine::restore(
            roster,
            classes,
            self.rotation,
            self.no_repeat.unwrap_or(no_repeat_default),
            spin_duration,
        )
    }
}

/// File-backed store for the single [`WheelData`] record.
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("state.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record, or a default one when no file exists yet.
    pub fn load(&self) -> Result<WheelData, WheelError> {
        if !self.path.exists() {
            tracing::debug!(path = ?self.path, "no saved state, starting fresh");
            return Ok(WheelData::default());
        }
        let content = fs::read_to_string(&self.path).map_err(WheelError::persistence)?;
        let data: WheelData =
            serde_json::from_str(&content).map_err(WheelError::persistence)?;
        tracing::info!(path = ?self.path, entries = data.entries.len(), "state loaded");
        Ok(data)
    }

    pub fn save(&self, data: &WheelData) -> Result<(), WheelError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(WheelError::persistence)?;
        }
        let json = serde_json::to_string_pretty(data).map_err(WheelError::persistence)?;
        fs::write(&self.path, json).map_err(WheelError::persistence)?;
        tracing::debug!(path = ?self.path, "state saved");
        Ok(())
    }
}
