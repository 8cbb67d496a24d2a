//! Interactive session over one wizard
//!
//! [`OnboardingSession`] is the presentation-side buffer around an
//! [`OnboardingWizard`]: it keeps the active step's draft and the last error,
//! so that the terminal UI and scripted replays only deal in edits and
//! navigation events.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{OnboardError, Result};
use crate::record::CompositeRecord;
use crate::settings::WizardSettings;
use crate::steps::{StepDraft, StepEdit};
use crate::wizard::{OnboardingWizard, WizardError, WizardStep};

/// One user action fed to a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Change a field of the active step
    Edit { edit: StepEdit },
    /// Validate and move forward
    Next,
    /// Move back without saving the active step
    Back,
    /// Hand the record off (review step only)
    Submit,
}

/// A recorded sequence of session events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayScript {
    pub events: Vec<SessionEvent>,
}

impl ReplayScript {
    /// Load a replay script from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read replay script from {:?}", path.as_ref()))?;

        let script: Self =
            serde_json::from_str(&content).context("Failed to parse replay script JSON")?;
        debug!(events = script.events.len(), "Loaded replay script");
        Ok(script)
    }
}

/// Wizard plus the draft of its active step
#[derive(Debug, Clone)]
pub struct OnboardingSession {
    wizard: OnboardingWizard,
    draft: StepDraft,
    last_error: Option<WizardError>,
}

impl OnboardingSession {
    /// Start a session with an empty record
    pub fn new(settings: WizardSettings) -> Self {
        Self::from_wizard(OnboardingWizard::new(settings))
    }

    /// Wrap an existing wizard, opening its active step
    pub fn from_wizard(wizard: OnboardingWizard) -> Self {
        let draft = wizard.open_step();
        Self {
            wizard,
            draft,
            last_error: None,
        }
    }

    pub fn wizard(&self) -> &OnboardingWizard {
        &self.wizard
    }

    pub fn current_step(&self) -> WizardStep {
        self.wizard.current_step()
    }

    /// The active step's draft
    pub fn draft(&self) -> &StepDraft {
        &self.draft
    }

    /// Error from the last failed action, cleared by a successful move
    pub fn last_error(&self) -> Option<&WizardError> {
        self.last_error.as_ref()
    }

    pub fn record(&self) -> &CompositeRecord {
        self.wizard.record()
    }

    /// Apply an edit to the active draft
    pub fn apply(&mut self, edit: StepEdit) -> std::result::Result<(), WizardError> {
        self.draft.apply(edit).inspect_err(|err| {
            self.last_error = Some(err.clone());
        })
    }

    /// Validate the active draft and advance
    pub fn next(&mut self) -> std::result::Result<WizardStep, WizardError> {
        match self.wizard.advance(&self.draft) {
            Ok(step) => {
                self.reopen();
                Ok(step)
            }
            Err(err) => {
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Step back, discarding unsaved edits of the active step
    pub fn back(&mut self) -> std::result::Result<WizardStep, WizardError> {
        match self.wizard.retreat() {
            Ok(step) => {
                self.reopen();
                Ok(step)
            }
            Err(err) => {
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Submit the record; on failure the session comes back unchanged
    /// apart from its last error
    pub fn submit(self) -> std::result::Result<CompositeRecord, (Self, WizardError)> {
        let Self { wizard, draft, .. } = self;
        wizard.submit().map_err(|(wizard, err)| {
            let session = Self {
                wizard,
                draft,
                last_error: Some(err.clone()),
            };
            (session, err)
        })
    }

    /// Feed a whole script through the session.
    ///
    /// Failed `next`/`back` events are kept as the last error and the replay
    /// carries on, like a user re-editing after a rejected step. The script
    /// must end with a successful `submit`.
    pub fn run_script(mut self, script: ReplayScript) -> Result<CompositeRecord> {
        let total = script.events.len();

        for (position, event) in script.events.into_iter().enumerate() {
            match event {
                SessionEvent::Edit { edit } => {
                    self.apply(edit).map_err(|err| {
                        OnboardError::replay(format!("event {}: {}", position + 1, err))
                    })?;
                }
                SessionEvent::Next => {
                    if let Err(err) = self.next() {
                        warn!(event = position + 1, error = %err, "Replay step rejected");
                    }
                }
                SessionEvent::Back => {
                    if let Err(err) = self.back() {
                        warn!(event = position + 1, error = %err, "Replay back ignored");
                    }
                }
                SessionEvent::Submit => {
                    let ignored = total - position - 1;
                    if ignored > 0 {
                        warn!(ignored, "Events after submit are ignored");
                    }
                    let hint = self.rejection_hint();
                    return self.submit().map_err(|(_, err)| {
                        OnboardError::replay(format!("event {}: {}{}", position + 1, err, hint))
                    });
                }
            }
        }

        Err(OnboardError::replay(format!(
            "script ended on {} without submitting{}",
            self.current_step(),
            self.rejection_hint()
        )))
    }

    fn reopen(&mut self) {
        self.draft = self.wizard.open_step();
        self.last_error = None;
        info!(step = %self.current_step(), "Opened step");
    }

    /// Trailing note naming the last validation failure, if any
    fn rejection_hint(&self) -> String {
        match self.last_error.as_ref().and_then(WizardError::as_validation) {
            Some(err) => format!(" (last rejection: {})", err),
            None => String::new(),
        }
    }
}
