//! Header and common widget rendering
//!
//! This module contains the step title, the progress gauge, the status line
//! and the navigation bar.

use crate::app::AppState;
use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::KeybindingContext;
use crate::theme::{Colors, Styles};
use crate::wizard::WizardStep;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Render the step title and progress gauge
pub fn render_step_header(f: &mut Frame, area: Rect, step: WizardStep) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let title = Line::from(vec![
        Span::styled("Client onboarding", Styles::title()),
        Span::styled("  |  ", Style::default().fg(Colors::FG_MUTED)),
        Span::styled(step.title(), Style::default().fg(Colors::HEADER)),
    ]);
    f.render_widget(Paragraph::new(title).alignment(Alignment::Center), chunks[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Colors::PROGRESS).bg(Colors::BG_GAUGE))
        .ratio(progress_ratio(step))
        .label(format!(
            "Step {} of {}",
            step.step_number(),
            WizardStep::TOTAL_STEPS
        ));
    f.render_widget(gauge, chunks[1]);
}

/// Share of the wizard reached on `step`
pub fn progress_ratio(step: WizardStep) -> f64 {
    step.step_number() as f64 / WizardStep::TOTAL_STEPS as f64
}

/// Render the inline error / status line
pub fn render_status_line(f: &mut Frame, area: Rect, message: Option<&str>) {
    let line = match message {
        Some(message) => Line::from(Span::styled(message.to_string(), Styles::error())),
        None => Line::from(""),
    };
    f.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::NONE)),
        area,
    );
}

/// Render the navigation bar
pub fn render_nav_bar(f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext, area: Rect) {
    let mut spans = Vec::new();
    for item in keybinding_ctx.get_nav_items(&state.mode()) {
        if !spans.is_empty() {
            spans.push(Span::styled(" | ", Style::default().fg(Colors::NAV_HINT)));
        }
        spans.push(Span::styled(item.key_display, Styles::key_hint()));
        spans.push(Span::styled(
            format!(" {}", item.action_label),
            Style::default().fg(Colors::FG_SECONDARY),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the help overlay
pub fn render_help_overlay(f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext) {
    let help_overlay = HelpOverlay::new(&state.mode(), keybinding_ctx);
    help_overlay.render(f, f.area());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_ratio_reaches_one_on_review() {
        assert!((progress_ratio(WizardStep::Identity) - 0.25).abs() < f64::EPSILON);
        assert!((progress_ratio(WizardStep::Review) - 1.0).abs() < f64::EPSILON);
    }
}
