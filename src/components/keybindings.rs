//! Keybinding system for context-aware keyboard shortcuts
//!
//! Provides a registry of keybindings that change based on the current application mode.

use crate::app::AppMode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NavigateUp,
    NavigateDown,
    /// Edit text, flip a toggle, step a select or add a list item
    Select,
    CyclePrevious,
    CycleNext,
    RemoveItem,
    NextStep,
    PreviousStep,
    Submit,
    Confirm,
    Cancel,
    ScrollUp,
    ScrollDown,
    Help,
    Quit,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Whether a key press triggers this binding (Shift is ignored)
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.key == event.code && self.modifiers == event.modifiers.difference(KeyModifiers::SHIFT)
    }
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    /// Mode-specific keybindings
    mode_bindings: HashMap<AppMode, Vec<Keybinding>>,
    /// Global keybindings (available in all modes except text editing)
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            mode_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    /// Register default keybindings for all modes
    fn register_defaults(&mut self) {
        self.global_bindings = vec![
            Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
            Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
            Keybinding::with_modifiers(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyAction::Quit,
                "Ctrl+C",
                "Quit",
            ),
        ];

        self.mode_bindings.insert(
            AppMode::Form,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous field"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next field"),
                Keybinding::new(KeyCode::Enter, KeyAction::Select, "Enter", "Edit field"),
                Keybinding::new(KeyCode::Left, KeyAction::CyclePrevious, "Left", "Previous option"),
                Keybinding::new(KeyCode::Right, KeyAction::CycleNext, "Right", "Next option"),
                Keybinding::new(KeyCode::Delete, KeyAction::RemoveItem, "Del", "Remove item"),
                Keybinding::new(KeyCode::Tab, KeyAction::NextStep, "Tab", "Next step"),
                Keybinding::new(KeyCode::BackTab, KeyAction::PreviousStep, "S-Tab", "Previous step"),
            ],
        );

        self.mode_bindings.insert(
            AppMode::Editing,
            vec![
                Keybinding::new(KeyCode::Enter, KeyAction::Confirm, "Enter", "Save value"),
                Keybinding::new(KeyCode::Esc, KeyAction::Cancel, "Esc", "Discard"),
            ],
        );

        self.mode_bindings.insert(
            AppMode::Review,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::ScrollUp, "Up", "Scroll up"),
                Keybinding::new(KeyCode::Down, KeyAction::ScrollDown, "Down", "Scroll down"),
                Keybinding::new(KeyCode::Enter, KeyAction::Submit, "Enter", "Submit"),
                Keybinding::new(KeyCode::BackTab, KeyAction::PreviousStep, "S-Tab", "Previous step"),
            ],
        );
    }

    /// Get keybindings for a specific mode (includes global bindings)
    pub fn get_bindings(&self, mode: &AppMode) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();

        if let Some(mode_bindings) = self.mode_bindings.get(mode) {
            bindings.extend(mode_bindings.iter());
        }

        // Typed characters belong to the editor
        if *mode != AppMode::Editing {
            bindings.extend(self.global_bindings.iter());
        }

        bindings
    }

    /// Resolve a key press to an action in the given mode
    pub fn action_for(&self, mode: &AppMode, event: &KeyEvent) -> Option<KeyAction> {
        self.get_bindings(mode)
            .into_iter()
            .find(|b| b.matches(event))
            .map(|b| b.action)
    }

    /// Get navigation bar items for display
    pub fn get_nav_items(&self, mode: &AppMode) -> Vec<NavBarItem> {
        let bindings = self.get_bindings(mode);

        let priority_actions = match mode {
            AppMode::Form => vec![
                KeyAction::NavigateUp,
                KeyAction::NavigateDown,
                KeyAction::Select,
                KeyAction::CycleNext,
                KeyAction::NextStep,
                KeyAction::PreviousStep,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            AppMode::Editing => vec![KeyAction::Confirm, KeyAction::Cancel],
            AppMode::Review => vec![
                KeyAction::ScrollUp,
                KeyAction::ScrollDown,
                KeyAction::Submit,
                KeyAction::PreviousStep,
                KeyAction::Quit,
            ],
        };

        // Combine paired keys into single items for cleaner display
        let mut items: Vec<NavBarItem> = Vec::new();
        let mut has_nav = false;
        let mut has_scroll = false;

        for action in priority_actions {
            let is_nav = matches!(action, KeyAction::NavigateUp | KeyAction::NavigateDown);
            let is_scroll = matches!(action, KeyAction::ScrollUp | KeyAction::ScrollDown);
            if (is_nav && has_nav) || (is_scroll && has_scroll) {
                continue;
            }

            if let Some(binding) = bindings.iter().find(|b| b.action == action) {
                if is_nav {
                    items.push(NavBarItem::new("Up/Dn", "Navigate"));
                    has_nav = true;
                } else if is_scroll {
                    items.push(NavBarItem::new("Up/Dn", "Scroll"));
                    has_scroll = true;
                } else if action == KeyAction::CycleNext {
                    items.push(NavBarItem::new("Left/Right", "Change option"));
                } else {
                    items.push(NavBarItem::new(&binding.display, &binding.description));
                }
            }
        }

        items
    }

    /// Get full help content for a mode (for help overlay)
    pub fn get_help_content(&self, mode: &AppMode) -> Vec<HelpSection> {
        let groups: [(&str, fn(KeyAction) -> bool); 3] = [
            ("Navigation", |a| {
                matches!(
                    a,
                    KeyAction::NavigateUp
                        | KeyAction::NavigateDown
                        | KeyAction::ScrollUp
                        | KeyAction::ScrollDown
                        | KeyAction::NextStep
                        | KeyAction::PreviousStep
                )
            }),
            ("Editing", |a| {
                matches!(
                    a,
                    KeyAction::Select
                        | KeyAction::CyclePrevious
                        | KeyAction::CycleNext
                        | KeyAction::RemoveItem
                        | KeyAction::Confirm
                        | KeyAction::Cancel
                        | KeyAction::Submit
                )
            }),
            ("General", |a| matches!(a, KeyAction::Help | KeyAction::Quit)),
        ];

        let bindings = self.get_bindings(mode);
        groups
            .iter()
            .filter_map(|(title, include)| {
                let items: Vec<(String, String)> = bindings
                    .iter()
                    .filter(|b| include(b.action))
                    .map(|b| (b.display.clone(), b.description.clone()))
                    .collect();
                (!items.is_empty()).then(|| HelpSection {
                    title: title.to_string(),
                    items,
                })
            })
            .collect()
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

impl NavBarItem {
    fn new(key_display: &str, action_label: &str) -> Self {
        Self {
            key_display: key_display.to_string(),
            action_label: action_label.to_string(),
        }
    }
}

/// Help section for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_form_bindings_resolve() {
        let ctx = KeybindingContext::new();
        assert_eq!(ctx.action_for(&AppMode::Form, &key(KeyCode::Tab)), Some(KeyAction::NextStep));
        assert_eq!(
            ctx.action_for(&AppMode::Form, &KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(KeyAction::PreviousStep)
        );
        assert_eq!(ctx.action_for(&AppMode::Form, &key(KeyCode::Char('q'))), Some(KeyAction::Quit));
    }

    #[test]
    fn test_editing_leaves_characters_to_the_editor() {
        let ctx = KeybindingContext::new();
        assert_eq!(ctx.action_for(&AppMode::Editing, &key(KeyCode::Char('q'))), None);
        assert_eq!(ctx.action_for(&AppMode::Editing, &key(KeyCode::Esc)), Some(KeyAction::Cancel));
    }

    #[test]
    fn test_nav_items_combine_arrows() {
        let ctx = KeybindingContext::new();
        let items = ctx.get_nav_items(&AppMode::Form);
        assert_eq!(items.iter().filter(|i| i.key_display == "Up/Dn").count(), 1);
        assert!(items.iter().any(|i| i.action_label == "Next step"));
    }

    #[test]
    fn test_help_content_groups() {
        let ctx = KeybindingContext::new();
        let sections = ctx.get_help_content(&AppMode::Review);
        let titles: Vec<_> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Navigation", "Editing", "General"]);
    }
}
