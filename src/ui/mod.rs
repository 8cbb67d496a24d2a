//! User interface rendering module
//!
//! This module is organized into submodules:
//! - `header` - Step title, progress, status line and navigation bar
//! - `screens` - Data-entry form and review screen

mod header;
pub mod screens;

use crate::app::{AppMode, AppState};
use crate::components::keybindings::KeybindingContext;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

pub use header::progress_ratio;

/// UI renderer for the application
///
/// This is the main entry point for UI rendering. It delegates to specialized
/// submodules for different parts of the UI.
#[derive(Debug, Default)]
pub struct UiRenderer;

impl UiRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render the complete UI for the current state
    pub fn render(&self, f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Title and progress
                Constraint::Min(3),    // Form or review
                Constraint::Length(1), // Error / status line
                Constraint::Length(1), // Navigation bar
            ])
            .split(f.area());

        header::render_step_header(f, chunks[0], state.session.current_step());

        match state.mode() {
            AppMode::Form | AppMode::Editing => screens::render_form_screen(f, chunks[1], state),
            AppMode::Review => screens::render_review_screen(f, chunks[1], state),
        }

        header::render_status_line(f, chunks[2], state.status_message.as_deref());
        header::render_nav_bar(f, state, keybinding_ctx, chunks[3]);

        // Help goes on top of everything
        if state.help_visible {
            header::render_help_overlay(f, state, keybinding_ctx);
        }
    }
}
