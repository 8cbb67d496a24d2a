//! Application module
//!
//! Contains the terminal event loop and key handling.
//!
//! # Module Structure
//! - `state` - Form model and application state (AppState, AppMode, FormRow)
//! - Main module - App struct and event loop

mod state;

pub use state::{AppMode, AppState, FieldKind, FieldRef, FormRow, form_rows};

use crate::components::keybindings::{KeyAction, KeybindingContext};
use crate::error::{OnboardError, Result};
use crate::record::CompositeRecord;
use crate::session::OnboardingSession;
use crate::ui::UiRenderer;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::Backend};
use std::time::Duration;
use tracing::{debug, info};

/// How long to wait for input before redrawing
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Main application struct
pub struct App {
    state: AppState,
    ui_renderer: UiRenderer,
    /// Keybinding context for navigation hints
    keybinding_context: KeybindingContext,
}

impl App {
    /// Create a new application around a session
    pub fn new(session: OnboardingSession) -> Self {
        info!("Creating new App instance");
        Self {
            state: AppState::new(session),
            ui_renderer: UiRenderer::new(),
            keybinding_context: KeybindingContext::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the main application loop.
    ///
    /// Returns the submitted record, or `None` when the user quits first.
    pub fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<Option<CompositeRecord>> {
        info!("Starting main application loop");

        loop {
            terminal
                .draw(|f| self.ui_renderer.render(f, &self.state, &self.keybinding_context))
                .map_err(|e| OnboardError::terminal(format!("Failed to draw: {}", e)))?;

            if crossterm::event::poll(POLL_INTERVAL)? {
                if let Event::Key(key_event) = crossterm::event::read()? {
                    if self.handle_key_event(key_event) {
                        break;
                    }
                }
            }
        }

        if !self.state.submit_requested {
            info!("Quit without submitting");
            return Ok(None);
        }

        self.state
            .session
            .submit()
            .map(Some)
            .map_err(|(_, err)| err.into())
    }

    /// Handle one key press, returning true when the loop should end
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> bool {
        if key_event.kind != KeyEventKind::Press {
            return false;
        }

        // Help overlay swallows everything except its own dismissal
        if self.state.help_visible {
            if matches!(key_event.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.state.help_visible = false;
            }
            return false;
        }

        let mode = self.state.mode();
        let Some(action) = self.keybinding_context.action_for(&mode, &key_event) else {
            if mode == AppMode::Editing {
                self.handle_editor_key(key_event);
            }
            return false;
        };
        debug!(?mode, ?action, "Key action");

        match action {
            KeyAction::Quit => return true,
            KeyAction::Help => self.state.help_visible = true,
            KeyAction::NavigateUp => self.state.select_previous(),
            KeyAction::NavigateDown => self.state.select_next(),
            KeyAction::Select => self.state.activate(),
            KeyAction::CyclePrevious => self.state.cycle(false),
            KeyAction::CycleNext => self.state.cycle(true),
            KeyAction::RemoveItem => self.state.remove_selected(),
            KeyAction::NextStep => self.state.next_step(),
            KeyAction::PreviousStep => self.state.previous_step(),
            KeyAction::Confirm => self.state.commit_edit(),
            KeyAction::Cancel => self.state.cancel_edit(),
            KeyAction::ScrollUp => {
                self.state.review_scroll = self.state.review_scroll.saturating_sub(1);
            }
            KeyAction::ScrollDown => {
                self.state.review_scroll = self.state.review_scroll.saturating_add(1);
            }
            KeyAction::Submit => return self.state.request_submit(),
        }
        false
    }

    fn handle_editor_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.input.push(c)
            }
            KeyCode::Backspace => {
                self.state.input.pop();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::WizardSettings;
    use crate::wizard::WizardStep;

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_quit_key_ends_loop() {
        let mut app = App::new(OnboardingSession::new(WizardSettings::default()));
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn test_help_overlay_toggles() {
        let mut app = App::new(OnboardingSession::new(WizardSettings::default()));
        press(&mut app, KeyCode::Char('?'));
        assert!(app.state().help_visible);
        assert!(!press(&mut app, KeyCode::Char('q')));
        press(&mut app, KeyCode::Esc);
        assert!(!app.state().help_visible);
    }

    #[test]
    fn test_keyboard_walk_through_identity() {
        let mut app = App::new(OnboardingSession::new(WizardSettings::default()));

        // Client type select, first row
        press(&mut app, KeyCode::Right);

        // Tax id, typed with q in the editor (not a quit)
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state().mode(), AppMode::Editing);
        type_text(&mut app, "9909q123456");
        assert!(!press(&mut app, KeyCode::Backspace));
        type_text(&mut app, "7");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.state().session.current_step(), WizardStep::CompanyInfo);
        assert_eq!(app.state().session.record().tin.as_deref(), Some("9909123457"));
    }
}
