use tracing::{debug, instrument};

use crate::describe::Composer;
use crate::page::{ButtonState, HostPage};

/// Blocking alert raised when generation fails outright.
pub const GENERATION_FAILED_ALERT: &str =
    "Failed to generate PR description. Please try again.";

/// Drives the generate-button click: Idle → Generating on click, back to
/// Idle unconditionally on completion. The disabled button during Generating
/// is the only guard against concurrent runs.
pub struct Session {
    composer: Composer,
}

impl Session {
    pub fn new(composer: Composer) -> Self {
        Self { composer }
    }

    /// Handle one click on the generate affordance.
    ///
    /// A non-empty result is written into the description field (the host
    /// dispatches the synthetic input event); a None result raises the
    /// failure alert. The button is restored to Idle on every path.
    #[instrument(skip_all)]
    pub async fn handle_click<P: HostPage>(&self, page: &mut P) {
        page.set_button_state(ButtonState::Generating);

        let description = self.composer.generate(page).await;
        match description {
            Some(text) if !text.is_empty() => {
                debug!(bytes = text.len(), "writing description into the page");
                page.apply_description(&text);
            }
            Some(_) => debug!("empty description, leaving the field untouched"),
            None => page.alert(GENERATION_FAILED_ALERT),
        }

        page.set_button_state(ButtonState::Idle);
    }
}
