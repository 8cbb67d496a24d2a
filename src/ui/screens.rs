//! Wizard screens.
//!
//! - the data-entry form shared by the first three steps
//! - the read-only review screen

use crate::app::{AppState, FieldKind, FormRow};
use crate::review::review_sections;
use crate::theme::{Colors, Styles};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Width reserved for field labels
const LABEL_WIDTH: usize = 34;

/// Render the form of the active data-entry step
pub fn render_form_screen(f: &mut Frame, area: Rect, state: &AppState) {
    let rows = state.rows();
    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| ListItem::new(form_line(state, index, row)))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border_active())
                .title(format!(" {} ", state.session.current_step().title())),
        )
        .highlight_style(Styles::selected());

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected.min(rows.len().saturating_sub(1))));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn form_line(state: &AppState, index: usize, row: &FormRow) -> Line<'static> {
    let marker = if row.required { "*" } else { " " };
    let label = format!("{}{:<width$}", marker, row.label, width = LABEL_WIDTH);

    let editing_this = state.editing == Some(row.field) && state.selected == index;
    let value = match row.kind {
        _ if editing_this => Span::styled(
            format!("{}_", state.input),
            Style::default().fg(Colors::SECONDARY),
        ),
        FieldKind::Add => Span::styled("", Style::default()),
        FieldKind::Toggle | FieldKind::Select => Span::styled(
            format!("< {} >", row.value),
            Style::default().fg(Colors::OPTION),
        ),
        FieldKind::Text if row.value.is_empty() => {
            Span::styled("(empty)", Styles::text_muted())
        }
        FieldKind::Text => Span::styled(row.value.clone(), Style::default().fg(Colors::FG_PRIMARY)),
    };

    let label_style = if row.kind == FieldKind::Add {
        Style::default().fg(Colors::SUCCESS)
    } else {
        Styles::label()
    };
    Line::from(vec![Span::styled(label, label_style), value])
}

/// Render the read-only review of the accumulated record
pub fn render_review_screen(f: &mut Frame, area: Rect, state: &AppState) {
    let mut lines: Vec<Line> = Vec::new();
    for section in review_sections(state.session.record()) {
        lines.push(Line::from(Span::styled(
            section.title,
            Styles::section(),
        )));
        for row in section.rows {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:<width$}", row.label, width = LABEL_WIDTH),
                    Styles::label(),
                ),
                Span::styled(row.value, Style::default().fg(Colors::FG_PRIMARY)),
            ]));
        }
        lines.push(Line::from(""));
    }

    let review = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border_active())
                .title(" Review and submit "),
        )
        .wrap(Wrap { trim: false })
        .scroll((state.review_scroll, 0));
    f.render_widget(review, area);
}
