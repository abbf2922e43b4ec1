pub mod backend;
pub mod types;

pub use backend::{BackendError, DescriptionBackend, HttpBackend};
pub use types::{GenerationRequest, GenerationResponse, GENERATE_ACTION};

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, warn};

use crate::config::Config;
use crate::diff::{self, UNKNOWN_FILE};
use crate::page::{HostPage, PageError};

/// Title used when the PR title input is empty or absent.
pub const DEFAULT_TITLE: &str = "Pull Request Description";

/// Substituted for diff text that exceeds the inline limit in the fallback
/// template's "Changes Made" section.
pub const DIFF_PLACEHOLDER: &str = "(Diff data extracted - in a real implementation, \
this would be processed by an AI to generate a detailed description)";

#[derive(Debug, Error)]
pub enum DescribeError {
    #[error(transparent)]
    Page(#[from] PageError),
}

/// Orchestrates metadata collection and produces the final description text,
/// delegating to the collaborator when one is configured and composing the
/// deterministic fallback otherwise.
pub struct Composer {
    backend: Option<Arc<dyn DescriptionBackend>>,
    config: Config,
}

impl Composer {
    pub fn new(backend: Option<Arc<dyn DescriptionBackend>>, config: Config) -> Self {
        Self { backend, config }
    }

    /// Generate a description for the current page. Never propagates an
    /// error: any failure is logged and collapses to None, which the click
    /// handler surfaces to the user.
    pub async fn generate<P: HostPage>(&self, page: &mut P) -> Option<String> {
        match self.try_generate(page).await {
            Ok(description) => Some(description),
            Err(err) => {
                error!(%err, "description generation failed");
                None
            }
        }
    }

    async fn try_generate<P: HostPage>(&self, page: &mut P) -> Result<String, DescribeError> {
        let diff_data = diff::collect_diff(page, &self.config.extraction).await?;

        let snapshot = page.snapshot()?;
        let request = GenerationRequest {
            diff_data,
            pr_title: snapshot.pr_title().unwrap_or_default(),
            branch_info: snapshot.branch_info().unwrap_or_default(),
        };

        if let Some(backend) = &self.backend {
            match backend.generate(&request).await {
                Ok(response) => match response.generated_description {
                    Some(description) if !description.is_empty() => {
                        debug!("using collaborator description");
                        return Ok(description);
                    }
                    _ => debug!("collaborator returned no description, using fallback"),
                },
                Err(err) => {
                    warn!(%err, "description backend unavailable, using fallback template");
                }
            }
        }

        Ok(fallback_description(
            &request,
            self.config.compose.inline_diff_limit,
        ))
    }
}

/// The deterministic fallback template. Fixed markdown embedding the title,
/// a summary sentence, either the raw diff (when short enough) or a
/// placeholder note, the branch info, and an attribution footer.
pub fn fallback_description(request: &GenerationRequest, inline_diff_limit: usize) -> String {
    let title = if request.pr_title.is_empty() {
        DEFAULT_TITLE
    } else {
        &request.pr_title
    };
    let summary_target = if request.diff_data.contains(UNKNOWN_FILE) {
        "multiple files"
    } else {
        "the codebase"
    };
    let changes = if request.diff_data.len() > inline_diff_limit {
        DIFF_PLACEHOLDER
    } else {
        &request.diff_data
    };
    let branch = if request.branch_info.is_empty() {
        "Not available"
    } else {
        &request.branch_info
    };

    format!(
        "# {title}\n\
         \n\
         ## Summary\n\
         This PR includes changes to {summary_target}.\n\
         \n\
         ## Changes Made\n\
         {changes}\n\
         \n\
         ## Testing\n\
         - [ ] Add testing steps here\n\
         \n\
         ## Additional Notes\n\
         - Branch information: {branch}\n\
         \n\
         ---\n\
         *This description was auto-generated by the GitHub PR Helper extension. \
         Please edit as needed.*"
    )
}
