//! The selector contract with the host page (brittle by nature — these match
//! GitHub's rendered markup, not anything this crate controls).

use once_cell::sync::Lazy;
use scraper::Selector;

use super::AFFORDANCE_ID;

fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Primary diff containers.
pub static DIFF_TABLES: Lazy<Selector> = Lazy::new(|| sel(".diff-table"));

/// Broadened container set used for the post-wait re-query.
pub static DIFF_CONTAINERS: Lazy<Selector> =
    Lazy::new(|| sel(".diff-table, .js-file-content"));

/// Rendered code lines within a diff container.
pub static BLOB_CODE: Lazy<Selector> = Lazy::new(|| sel(".blob-code"));

/// File-header annotation carrying the `data-path` attribute.
pub static FILE_HEADER: Lazy<Selector> = Lazy::new(|| sel(".file-header"));

/// The PR description textarea.
pub static DESCRIPTION_FIELD: Lazy<Selector> =
    Lazy::new(|| sel(r#"textarea[name="pull_request[body]"]"#));

/// The PR title input.
pub static TITLE_FIELD: Lazy<Selector> =
    Lazy::new(|| sel(r#"input[name="pull_request[title]"]"#));

/// Branch-comparison element ("base...head").
pub static BRANCH_PAIR: Lazy<Selector> =
    Lazy::new(|| sel(".range-cross-repo-pair .css-truncate-target"));

/// Navigation tabs; the "Files changed" tab is found by visible text.
pub static NAV_TABS: Lazy<Selector> = Lazy::new(|| sel("a.tabnav-tab"));

/// The injected affordance, keyed by its fixed id.
pub static AFFORDANCE: Lazy<Selector> =
    Lazy::new(|| sel(&format!("#{AFFORDANCE_ID}")));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_selectors_compile() {
        // Lazy statics panic on first use if the CSS is invalid; force them.
        for selector in [
            &DIFF_TABLES,
            &DIFF_CONTAINERS,
            &BLOB_CODE,
            &FILE_HEADER,
            &DESCRIPTION_FIELD,
            &TITLE_FIELD,
            &BRANCH_PAIR,
            &NAV_TABS,
            &AFFORDANCE,
        ] {
            let _ = Lazy::force(selector);
        }
    }
}
