pub mod host;
pub mod selectors;
pub mod watcher;

pub use host::{ButtonState, HostPage, StaticPage};

use scraper::Html;
use thiserror::Error;

/// Fixed element id keying the injected "Generate Description" affordance.
pub const AFFORDANCE_ID: &str = "ai-pr-description-button";

/// Visible text identifying the navigation tab that lazy-loads the diff.
pub const FILES_TAB_LABEL: &str = "Files changed";

#[derive(Debug, Error)]
pub enum PageError {
    /// The page is no longer reachable — the user navigated away while work
    /// was in flight. In-flight work fails without visible effect.
    #[error("page is no longer attached")]
    Detached,
}

/// True iff the given URL path is a PR-creation page.
///
/// GitHub renders the new-PR form both on compare pages
/// (`/{owner}/{repo}/compare/...`) and under `/pull/new`.
pub fn is_pr_creation_page(path: &str) -> bool {
    path.contains("/compare") || path.contains("/pull/new")
}

/// A point-in-time capture of the host page: URL path plus rendered HTML.
///
/// All queries parse the HTML on demand and return owned data, so a snapshot
/// is cheap to move across await points (`scraper::Html` itself is not Send).
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    path: String,
    html: String,
}

impl PageSnapshot {
    pub fn new(path: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            html: html.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub(crate) fn document(&self) -> Html {
        Html::parse_document(&self.html)
    }

    /// Current value of the PR title input, if the input exists.
    pub fn pr_title(&self) -> Option<String> {
        self.document()
            .select(&selectors::TITLE_FIELD)
            .next()
            .and_then(|el| el.value().attr("value"))
            .map(str::to_string)
    }

    /// Text of the branch-comparison element, if present.
    pub fn branch_info(&self) -> Option<String> {
        self.document()
            .select(&selectors::BRANCH_PAIR)
            .next()
            .map(|el| el.text().collect())
    }

    pub fn has_description_field(&self) -> bool {
        self.document()
            .select(&selectors::DESCRIPTION_FIELD)
            .next()
            .is_some()
    }

    pub fn has_affordance(&self) -> bool {
        self.document().select(&selectors::AFFORDANCE).next().is_some()
    }

    /// Whether the primary diff containers (`.diff-table`) are rendered.
    pub fn has_primary_diff_containers(&self) -> bool {
        self.document().select(&selectors::DIFF_TABLES).next().is_some()
    }

    /// Whether any container from the broadened selector set is rendered.
    pub fn has_diff_containers(&self) -> bool {
        self.document()
            .select(&selectors::DIFF_CONTAINERS)
            .next()
            .is_some()
    }

    /// Whether a "Files changed" navigation tab is present, matched by its
    /// visible text.
    pub fn files_tab_present(&self) -> bool {
        self.document().select(&selectors::NAV_TABS).any(|tab| {
            let text: String = tab.text().collect();
            text.contains(FILES_TAB_LABEL)
        })
    }
}
