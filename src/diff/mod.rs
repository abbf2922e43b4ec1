pub mod extract;

pub use extract::{render_diff, EMPTY_DIFF_DATA, NO_DIFF_DATA, UNKNOWN_FILE};

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::config::ExtractionConfig;
use crate::page::{HostPage, PageError};

/// Produce a best-effort textual rendering of the visible diff.
///
/// When no primary containers are rendered and a "Files changed" tab exists,
/// the tab is activated and we wait for the lazy-loaded content before
/// re-querying with the broadened selector set. A page with no containers at
/// all yields the [`NO_DIFF_DATA`] sentinel rather than an error.
pub async fn collect_diff<P: HostPage>(
    page: &mut P,
    config: &ExtractionConfig,
) -> Result<String, PageError> {
    let snapshot = page.snapshot()?;
    if !snapshot.has_primary_diff_containers() && snapshot.files_tab_present() {
        debug!("no diff tables visible, activating files tab");
        if page.activate_files_tab().await {
            wait_for_containers(page, config).await?;
        }
    }

    let snapshot = page.snapshot()?;
    Ok(render_diff(&snapshot).unwrap_or_else(|| NO_DIFF_DATA.to_string()))
}

/// Wait for diff containers to appear after tab activation.
///
/// Default strategy polls for container presence up to the configured bound;
/// `use_fixed_delay` sleeps for the whole bound without polling.
async fn wait_for_containers<P: HostPage>(
    page: &mut P,
    config: &ExtractionConfig,
) -> Result<(), PageError> {
    if config.use_fixed_delay {
        sleep(Duration::from_millis(config.lazy_load_delay_ms)).await;
        return Ok(());
    }

    let deadline = Instant::now() + Duration::from_millis(config.lazy_load_delay_ms);
    loop {
        if page.snapshot()?.has_diff_containers() {
            debug!("diff containers rendered");
            return Ok(());
        }
        if Instant::now() >= deadline {
            debug!("gave up waiting for diff containers");
            return Ok(());
        }
        sleep(Duration::from_millis(config.poll_interval_ms)).await;
    }
}
