//! Saved class lists: named snapshots of an entry list, independent of the
//! active roster.
//!
//! Saving overwrites (last write wins), loading replaces the active roster
//! wholesale, duplicating generates a non-colliding " (copy)" name, and the
//! text export joins entries with newlines for the clipboard.

use std::collections::BTreeMap;

use chrono::Local;

use crate::error::WheelError;

/// One saved snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedClass {
    pub entries: Vec<String>,
    pub saved_at: String,
}

/// Mapping from class name to snapshot. BTreeMap keeps iteration sorted,
/// which is the order the class picker shows.
#[derive(Debug, Clone, Default)]
pub struct ClassBook {
    classes: BTreeMap<String, SavedClass>,
}

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

impl ClassBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save `entries` under `name`, overwriting any previous snapshot with
    /// that name. Empty names and empty entry lists are rejected with the
    /// mapping untouched.
    pub fn save(&mut self, name: &str, entries: &[String]) -> Result<(), WheelError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WheelError::validation("class name is empty"));
        }
        if entries.is_empty() {
            return Err(WheelError::validation(
                "add at least one name before saving a class",
            ));
        }
        self.classes.insert(
            name.to_string(),
            SavedClass {
                entries: entries.to_vec(),
                saved_at: timestamp(),
            },
        );
        tracing::info!(class = name, count = entries.len(), "class saved");
        Ok(())
    }

    /// Entries of the named class, for loading into the roster.
    pub fn load(&self, name: &str) -> Result<Vec<String>, WheelError> {
        self.get(name)
            .map(|class| class.entries.clone())
            .ok_or_else(|| WheelError::validation(format!("no class named \"{}\"", name)))
    }

    /// Duplicate the named class under a generated, non-colliding name:
    /// "Class A" becomes "Class A (copy)", then "Class A (copy 1)", and so
    /// on. Returns the new name.
    pub fn duplicate(&mut self, name: &str) -> Result<String, WheelError> {
        let source = self
            .get(name)
            .ok_or_else(|| WheelError::validation(format!("no class named \"{}\"", name)))?
            .clone();

        let mut new_name = format!("{} (copy)", name);
        let mut counter = 1;
        while self.classes.contains_key(&new_name) {
            new_name = format!("{} (copy {})", name, counter);
            counter += 1;
        }

        self.classes.insert(
            new_name.clone(),
            SavedClass {
                entries: source.entries,
                saved_at: timestamp(),
            },
        );
        tracing::info!(from = name, to = %new_name, "class duplicated");
        Ok(new_name)
    }

    pub fn delete(&mut self, name: &str) -> Result<(), WheelError> {
        if self.classes.remove(name).is_none() {
            return Err(WheelError::validation(format!(
                "no class named \"{}\"",
                name
            )));
        }
        tracing::info!(class = name, "class deleted");
        Ok(())
    }

    /// Newline-joined entries of the named class, for clipboard export.
    pub fn text(&self, name: &str) -> Result<String, WheelError> {
        self.get(name)
            .map(|class| class.entries.join("\n"))
            .ok_or_else(|| WheelError::validation(format!("no class named \"{}\"", name)))
    }

    pub fn get(&self, name: &str) -> Option<&SavedClass> {
        self.classes.get(name)
    }

    /// Class names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Insert a snapshot as-is (used when restoring persisted state).
    pub fn insert_raw(&mut self, name: String, class: SavedClass) {
        let name = name.trim().to_string();
        if name.is_empty() || class.entries.is_empty() {
            return;
        }
        self.classes.insert(name, class);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let mut book = ClassBook::new();
        book.save("Class A", &names(&["Alice", "Bob"])).unwrap();
        assert_eq!(book.load("Class A").unwrap(), names(&["Alice", "Bob"]));
        assert!(!book.get("Class A").unwrap().saved_at.is_empty());
    }

    #[test]
    fn test_save_overwrites_existing_snapshot() {
        let mut book = ClassBook::new();
        book.save("Class A", &names(&["Alice"])).unwrap();
        book.save("Class A", &names(&["Bob"])).unwrap();
        assert_eq!(book.load("Class A").unwrap(), names(&["Bob"]));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_save_rejects_empty_name_and_empty_entries() {
        let mut book = ClassBook::new();
        assert!(book.save("  ", &names(&["Alice"])).is_err());
        assert!(book.save("Class A", &[]).is_err());
        assert!(book.is_empty());
    }

    #[test]
    fn test_duplicate_generates_copy_name() {
        let mut book = ClassBook::new();
        book.save("Class A", &names(&["Alice"])).unwrap();
        assert_eq!(book.duplicate("Class A").unwrap(), "Class A (copy)");
    }

    #[test]
    fn test_duplicate_skips_taken_copy_names() {
        let mut book = ClassBook::new();
        book.save("Class A", &names(&["Alice"])).unwrap();
        book.save("Class A (copy)", &names(&["Alice"])).unwrap();
        assert_eq!(book.duplicate("Class A").unwrap(), "Class A (copy 1)");
        assert_eq!(book.duplicate("Class A").unwrap(), "Class A (copy 2)");
    }

    #[test]
    fn test_duplicate_unknown_class_fails() {
        let mut book = ClassBook::new();
        assert!(book.duplicate("Ghost").is_err());
    }

    #[test]
    fn test_delete_removes_and_errors_on_unknown() {
        let mut book = ClassBook::new();
        book.save("Class A", &names(&["Alice"])).unwrap();
        book.delete("Class A").unwrap();
        assert!(book.delete("Class A").is_err());
        assert!(book.is_empty());
    }

    #[test]
    fn test_text_joins_with_newlines() {
        let mut book = ClassBook::new();
        book.save("Class A", &names(&["Alice", "Bob", "Clara"]))
            .unwrap();
        assert_eq!(book.text("Class A").unwrap(), "Alice\nBob\nClara");
    }

    #[test]
    fn test_names_iterate_sorted() {
        let mut book = ClassBook::new();
        book.save("B", &names(&["x"])).unwrap();
        book.save("A", &names(&["y"])).unwrap();
        let listed: Vec<&str> = book.names().collect();
        assert_eq!(listed, vec!["A", "B"]);
    }
}
