//! Frontend abstraction layer.
//!
//! The `Frontend` trait separates rendering and input from the engine and
//! app logic: frontends poll native events into the frontend-agnostic
//! [`FrontendEvent`] enum and draw from app state. The only implementation
//! today is the ratatui TUI.

pub mod events;
pub mod tui;

use anyhow::Result;

use crate::app::App;
pub use events::FrontendEvent;
pub use tui::TuiFrontend;

pub trait Frontend {
    /// Poll for pending user input events (empty when there are none).
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>>;

    /// Render the current application state. Called once per frame.
    fn render(&mut self, app: &mut App) -> Result<()>;

    /// Restore the terminal and perform any shutdown work.
    fn cleanup(&mut self) -> Result<()>;

    /// Current rendering area size.
    fn size(&self) -> (u16, u16);
}
