//! Clipboard export for class lists.
//!
//! Uses arboard for cross-platform clipboard access.

use anyhow::Result;
use arboard::Clipboard;

/// Copy text to the system clipboard.
pub fn copy(text: &str) -> Result<()> {
    if text.is_empty() {
        return Ok(()); // Nothing to copy
    }

    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text.to_string())?;
    tracing::debug!("Copied {} bytes to clipboard", text.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Requires clipboard access, may fail in CI
    fn test_copy() {
        copy("Alice\nBob\nClara").expect("Copy failed");
    }

    #[test]
    fn test_empty_copy() {
        // Should not fail on empty string
        assert!(copy("").is_ok());
    }
}
