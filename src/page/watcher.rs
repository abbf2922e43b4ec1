//! Level-triggered affordance keeper: re-evaluate the page predicate on every
//! mutation event and inject the generate button when it is missing.

use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::{is_pr_creation_page, HostPage};

/// Markup injected before the description field: the generate button wrapped
/// in a positioning container. The button id must stay in sync with
/// [`super::AFFORDANCE_ID`].
pub const AFFORDANCE_MARKUP: &str = "<div style=\"margin: 10px 0\">\
<button id=\"ai-pr-description-button\" class=\"btn btn-sm\" \
style=\"margin-right: 8px\">Generate PR Description</button></div>";

/// Summary of one batch of DOM subtree mutations delivered by the host.
/// The watcher is level-triggered, so only the arrival of a batch matters;
/// the counts are for logging.
#[derive(Debug, Clone, Copy, Default)]
pub struct MutationBatch {
    pub added: usize,
    pub removed: usize,
}

/// Ensure exactly one affordance is present when the page qualifies.
///
/// Idempotent: a page that already carries the affordance is left alone, so
/// re-running on every mutation batch is safe. A qualifying page without a
/// description field is skipped silently. Returns whether an injection
/// happened.
pub fn ensure_affordance<P: HostPage>(page: &mut P) -> bool {
    let Ok(snapshot) = page.snapshot() else {
        return false;
    };
    if !is_pr_creation_page(snapshot.path()) {
        return false;
    }
    if snapshot.has_affordance() {
        return false;
    }
    if !snapshot.has_description_field() {
        debug!(path = snapshot.path(), "no description field, skipping injection");
        return false;
    }
    debug!(path = snapshot.path(), "injecting generate affordance");
    page.inject_affordance();
    true
}

/// Observe the page until the mutation channel closes: one initial check to
/// cover pages that already qualify at load time, then one re-check per
/// mutation batch.
pub async fn watch<P: HostPage>(page: &mut P, mut mutations: mpsc::Receiver<MutationBatch>) {
    ensure_affordance(page);
    while let Some(batch) = mutations.recv().await {
        trace!(added = batch.added, removed = batch.removed, "mutation batch");
        ensure_affordance(page);
    }
}
