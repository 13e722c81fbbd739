//! Application state and command dispatch.
//!
//! `App` sits between the frontend and the engine: it turns frontend events
//! into engine commands, owns the input widgets and list selections, routes
//! destructive commands through a confirmation prompt, advances the spin
//! animation from the frame clock, and persists after every mutation.
//! Persistence failures become status-line warnings; the in-memory state is
//! always kept.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::style::Style;
use ratatui::widgets::ListState;
use tui_textarea::TextArea;

use crate::clipboard;
use crate::config::Config;
use crate::frontend::FrontendEvent;
use crate::store::{Store, WheelData};
use crate::wheel::{SpinTick, WheelEngine};

/// Which input the keyboard currently drives.
#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    /// Typing into the names box.
    AddingNames,
    /// Typing a class name for saving.
    ClassName,
    /// Waiting for y/n on a destructive action.
    Confirm(PendingAction),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    ClearEntries,
    Reset,
    DeleteClass(String),
}

impl PendingAction {
    /// Prompt shown on the status line while waiting for confirmation.
    pub fn prompt(&self) -> String {
        match self {
            Self::ClearEntries => "Clear all names? (y/n)".to_string(),
            Self::Reset => "Reset names, draws and rotation? (y/n)".to_string(),
            Self::DeleteClass(name) => format!("Delete class \"{}\"? (y/n)", name),
        }
    }
}

/// Sidebar pane that owns the Up/Down selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Roster,
    Classes,
}

pub struct App {
    pub engine: WheelEngine,
    pub config: Config,
    pub running: bool,
    pub mode: InputMode,
    pub focus: Pane,
    pub name_input: TextArea<'static>,
    pub class_input: TextArea<'static>,
    pub roster_state: ListState,
    pub classes_state: ListState,
    pub status: Option<String>,
    store: Store,
    rng: StdRng,
    last_tick: Instant,
}

fn make_input(placeholder: &str) -> TextArea<'static> {
    let mut input = TextArea::default();
    input.set_placeholder_text(placeholder);
    input.set_cursor_line_style(Style::default());
    input
}

const NAMES_PLACEHOLDER: &str = "Type or paste names, separated by spaces, commas or newlines";
const CLASS_PLACEHOLDER: &str = "Class name";

impl App {
    pub fn new(config: Config, store: Store) -> Self {
        let data = store.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not load saved state, starting fresh");
            WheelData::default()
        });
        let engine = data.into_engine(config.spin_duration(), config.wheel.no_repeat);

        Self {
            engine,
            config,
            running: true,
            mode: InputMode::Normal,
            focus: Pane::Roster,
            name_input: make_input(NAMES_PLACEHOLDER),
            class_input: make_input(CLASS_PLACEHOLDER),
            roster_state: ListState::default(),
            classes_state: ListState::default(),
            status: None,
            store,
            rng: StdRng::from_entropy(),
            last_tick: Instant::now(),
        }
    }

    // --- frame loop ---

    /// Advance the spin animation by the wall-clock time since the last
    /// frame and keep list selections in range.
    pub fn update(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_tick;
        self.last_tick = now;

        if let SpinTick::Completed(name) = self.engine.tick(dt) {
            self.status = Some(format!("Drawn: {}", name));
            self.persist();
        }

        self.normalize_selections();
    }

    /// Write the whole state out. A failure is reported on the status line
    /// and logged; in-memory state is not rolled back.
    pub fn persist(&mut self) {
        if let Err(e) = self.store.save(&WheelData::capture(&self.engine)) {
            tracing::warn!(error = %e, "state save failed");
            self.status = Some(format!("Warning: {}", e));
        }
    }

    // --- event handling ---

    pub fn handle_event(&mut self, event: FrontendEvent) {
        match event {
            FrontendEvent::Key { code, modifiers } => self.on_key(code, modifiers),
            FrontendEvent::Paste { text } => self.on_paste(&text),
            FrontendEvent::Resize { .. } => {}
            FrontendEvent::Quit => self.quit(),
        }
    }

    fn on_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match self.mode.clone() {
            InputMode::Confirm(action) => self.on_confirm_key(code, action),
            InputMode::AddingNames => self.on_names_key(code, modifiers),
            InputMode::ClassName => self.on_class_name_key(code, modifiers),
            InputMode::Normal => self.on_normal_key(code),
        }
    }

    fn on_confirm_key(&mut self, code: KeyCode, action: PendingAction) {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.mode = InputMode::Normal;
                self.perform(action);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.mode = InputMode::Normal;
                self.status = Some("Cancelled".to_string());
            }
            _ => {}
        }
    }

    fn perform(&mut self, action: PendingAction) {
        match action {
            PendingAction::ClearEntries => {
                self.engine.clear_entries();
                self.status = Some("All names cleared".to_string());
            }
            PendingAction::Reset => {
                self.engine.reset();
                self.status = Some("Wheel reset".to_string());
            }
            PendingAction::DeleteClass(name) => match self.engine.delete_class(&name) {
                Ok(()) => self.status = Some(format!("Class \"{}\" deleted", name)),
                Err(e) => self.status = Some(e.to_string()),
            },
        }
        self.persist();
    }

    fn on_names_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Esc => self.mode = InputMode::Normal,
            KeyCode::Enter => self.commit_names(),
            _ => {
                self.name_input.input(KeyEvent::new(code, modifiers));
            }
        }
    }

    fn commit_names(&mut self) {
        let raw = self.name_input.lines().join("\n");
        match self.engine.add_entries(&raw) {
            Ok(outcome) => {
                self.name_input = make_input(NAMES_PLACEHOLDER);
                self.mode = InputMode::Normal;
                self.status = Some(if outcome.duplicates > 0 {
                    format!(
                        "{} names added ({} already on the wheel)",
                        outcome.added, outcome.duplicates
                    )
                } else {
                    format!("{} names added", outcome.added)
                });
                self.persist();
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn on_class_name_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Esc => self.mode = InputMode::Normal,
            KeyCode::Enter => {
                let name = self.class_input.lines().join(" ").trim().to_string();
                match self.engine.save_class(&name) {
                    Ok(()) => {
                        self.class_input = make_input(CLASS_PLACEHOLDER);
                        self.mode = InputMode::Normal;
                        self.status = Some(format!("Class \"{}\" saved", name));
                        self.persist();
                    }
                    Err(e) => self.status = Some(e.to_string()),
                }
            }
            _ => {
                self.class_input.input(KeyEvent::new(code, modifiers));
            }
        }
    }

    fn on_normal_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('a') => self.mode = InputMode::AddingNames,
            KeyCode::Char('s') => self.start_spin(),
            KeyCode::Char('n') => {
                self.engine.toggle_no_repeat();
                self.status = Some(if self.engine.no_repeat() {
                    "No-repeat on: drawn names stay out".to_string()
                } else {
                    "No-repeat off: every name stays on the wheel".to_string()
                });
                self.persist();
            }
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Pane::Roster => Pane::Classes,
                    Pane::Classes => Pane::Roster,
                };
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Char('d') => self.remove_selected_entry(),
            KeyCode::Char('c') => {
                if !self.engine.roster().is_empty() {
                    self.mode = InputMode::Confirm(PendingAction::ClearEntries);
                }
            }
            KeyCode::Char('r') => self.mode = InputMode::Confirm(PendingAction::Reset),
            KeyCode::Char('w') => self.mode = InputMode::ClassName,
            KeyCode::Char('l') => self.load_selected_class(),
            KeyCode::Char('y') => self.copy_selected_class(),
            KeyCode::Char('u') => self.duplicate_selected_class(),
            KeyCode::Char('x') => {
                if let Some(name) = self.selected_class() {
                    self.mode = InputMode::Confirm(PendingAction::DeleteClass(name));
                } else {
                    self.status = Some("Select a class first".to_string());
                }
            }
            _ => {}
        }
    }

    fn on_paste(&mut self, text: &str) {
        // Pasting anywhere outside the class-name box means names
        if self.mode != InputMode::ClassName {
            self.mode = InputMode::AddingNames;
            for (i, line) in text.split('\n').enumerate() {
                if i > 0 {
                    self.name_input.insert_newline();
                }
                self.name_input.insert_str(line.trim_end_matches('\r'));
            }
        } else {
            self.class_input.insert_str(text.trim());
        }
    }

    fn quit(&mut self) {
        self.persist();
        self.running = false;
    }

    // --- commands ---

    fn start_spin(&mut self) {
        match self.engine.start_spin(&mut self.rng) {
            Ok(()) => self.status = Some("Spinning…".to_string()),
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn remove_selected_entry(&mut self) {
        if self.focus != Pane::Roster {
            return;
        }
        let Some(index) = self.roster_state.selected() else {
            return;
        };
        let name = self.engine.roster().entries().get(index).cloned();
        self.engine.remove_entry(index);
        if let Some(name) = name {
            self.status = Some(format!("Removed {}", name));
            self.persist();
        }
    }

    fn load_selected_class(&mut self) {
        let Some(name) = self.selected_class() else {
            self.status = Some("Select a class first".to_string());
            return;
        };
        match self.engine.load_class(&name) {
            Ok(()) => {
                self.status = Some(format!("Class \"{}\" loaded", name));
                self.persist();
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn copy_selected_class(&mut self) {
        let Some(name) = self.selected_class() else {
            self.status = Some("Select a class first".to_string());
            return;
        };
        match self.engine.class_text(&name) {
            Ok(text) => {
                let count = text.lines().count();
                match clipboard::copy(&text) {
                    Ok(()) => {
                        self.status =
                            Some(format!("{} names from \"{}\" copied", count, name));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "clipboard copy failed");
                        self.status = Some(format!("Clipboard unavailable: {}", e));
                    }
                }
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn duplicate_selected_class(&mut self) {
        let Some(name) = self.selected_class() else {
            self.status = Some("Select a class first".to_string());
            return;
        };
        match self.engine.duplicate_class(&name) {
            Ok(new_name) => {
                self.status = Some(format!("Class duplicated as \"{}\"", new_name));
                self.persist();
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    // --- selection helpers ---

    pub fn selected_class(&self) -> Option<String> {
        let index = self.classes_state.selected()?;
        self.engine.classes().names().nth(index).map(str::to_owned)
    }

    fn move_selection(&mut self, delta: i32) {
        let len = match self.focus {
            Pane::Roster => self.engine.roster().len(),
            Pane::Classes => self.engine.classes().len(),
        };
        let state = match self.focus {
            Pane::Roster => &mut self.roster_state,
            Pane::Classes => &mut self.classes_state,
        };
        if len == 0 {
            state.select(None);
            return;
        }
        let current = state.selected().unwrap_or(0);
        let next = if delta < 0 {
            current.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            (current + delta as usize).min(len - 1)
        };
        state.select(Some(next));
    }

    fn normalize_selections(&mut self) {
        let roster_len = self.engine.roster().len();
        Self::clamp(&mut self.roster_state, roster_len);
        let class_len = self.engine.classes().len();
        Self::clamp(&mut self.classes_state, class_len);
    }

    fn clamp(state: &mut ListState, len: usize) {
        match (state.selected(), len) {
            (_, 0) => state.select(None),
            (None, _) => state.select(Some(0)),
            (Some(i), _) if i >= len => state.select(Some(len - 1)),
            _ => {}
        }
    }
}
