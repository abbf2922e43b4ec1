use async_trait::async_trait;
use tracing::{debug, warn};

use super::watcher::AFFORDANCE_MARKUP;
use super::{PageError, PageSnapshot};

/// The two states of the generate button. The disabled button is the only
/// guard against concurrent generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Idle,
    Generating,
}

impl ButtonState {
    pub fn label(self) -> &'static str {
        match self {
            ButtonState::Idle => "Generate PR Description",
            ButtonState::Generating => "Generating...",
        }
    }

    pub fn disabled(self) -> bool {
        matches!(self, ButtonState::Generating)
    }
}

/// Seam to the live host page. Everything the watcher, extractor, and click
/// handler need from the page goes through this trait, keeping their logic
/// testable against scripted implementations.
#[async_trait]
pub trait HostPage: Send {
    /// Capture the current URL path and rendered HTML. Fails with
    /// [`PageError::Detached`] once the page is gone.
    fn snapshot(&self) -> Result<PageSnapshot, PageError>;

    /// Insert the affordance markup immediately before the PR description
    /// field. Callers are responsible for the idempotence check; a page with
    /// no description field ignores the call.
    fn inject_affordance(&mut self);

    /// Activate the "Files changed" navigation tab so lazy-loaded diff
    /// content starts rendering. Returns whether a tab was found and clicked.
    async fn activate_files_tab(&mut self) -> bool;

    /// Write the generated text into the description field and dispatch a
    /// synthetic bubbling input event so host-page listeners observe it.
    fn apply_description(&mut self, text: &str);

    fn set_button_state(&mut self, state: ButtonState);

    /// Raise a blocking user-facing alert.
    fn alert(&mut self, message: &str);
}

/// A [`HostPage`] backed by a captured HTML document. This is what the CLI
/// drives: a static page can be snapshotted and spliced, but it cannot
/// lazy-load anything, so tab activation reports failure.
pub struct StaticPage {
    path: String,
    html: String,
    description: Option<String>,
    input_events: usize,
    button_state: ButtonState,
    alerts: Vec<String>,
}

impl StaticPage {
    pub fn new(path: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            html: html.into(),
            description: None,
            input_events: 0,
            button_state: ButtonState::Idle,
            alerts: Vec::new(),
        }
    }

    /// The description written into the page, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Number of synthetic input events dispatched alongside description
    /// writes.
    pub fn input_events(&self) -> usize {
        self.input_events
    }

    pub fn button_state(&self) -> ButtonState {
        self.button_state
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }
}

#[async_trait]
impl HostPage for StaticPage {
    fn snapshot(&self) -> Result<PageSnapshot, PageError> {
        Ok(PageSnapshot::new(self.path.clone(), self.html.clone()))
    }

    fn inject_affordance(&mut self) {
        // Splice the markup in front of the description textarea's open tag.
        let Some(field) = self.html.find("pull_request[body]") else {
            debug!("description field not found, skipping injection");
            return;
        };
        let Some(tag_start) = self.html[..field].rfind('<') else {
            debug!("malformed capture, skipping injection");
            return;
        };
        self.html.insert_str(tag_start, AFFORDANCE_MARKUP);
    }

    async fn activate_files_tab(&mut self) -> bool {
        debug!("static capture cannot lazy-load the files tab");
        false
    }

    fn apply_description(&mut self, text: &str) {
        self.description = Some(text.to_string());
        self.input_events += 1;
    }

    fn set_button_state(&mut self, state: ButtonState) {
        self.button_state = state;
    }

    fn alert(&mut self, message: &str) {
        warn!(alert = message, "page alert");
        self.alerts.push(message.to_string());
    }
}
