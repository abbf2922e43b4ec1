use scraper::ElementRef;

use crate::page::{selectors, PageSnapshot};

/// Returned when no diff containers exist anywhere on the page.
pub const NO_DIFF_DATA: &str =
    "No diff data found. Make sure you have committed changes to compare.";

/// Returned when containers exist but yield no text.
pub const EMPTY_DIFF_DATA: &str = "Could not extract specific diff data";

/// File-name sentinel for a container with no reachable file header.
pub const UNKNOWN_FILE: &str = "Unknown file";

/// Render the visible diff as markdown-ish text: a `## <file>` header per
/// container followed by its `+`/`-` lines, in document order.
///
/// Returns None when the broadened container set matches nothing; the caller
/// substitutes [`NO_DIFF_DATA`]. Unchanged lines are omitted entirely.
pub fn render_diff(snapshot: &PageSnapshot) -> Option<String> {
    let document = snapshot.document();
    let containers: Vec<ElementRef> = document.select(&selectors::DIFF_CONTAINERS).collect();
    if containers.is_empty() {
        return None;
    }

    let mut out = String::new();
    for container in containers {
        let file_name = file_name_for(container).unwrap_or_else(|| UNKNOWN_FILE.to_string());
        out.push_str(&format!("\n## {file_name}\n\n"));

        for line in container.select(&selectors::BLOB_CODE) {
            let text: String = line.text().collect();
            if has_class(line, "blob-code-addition") {
                out.push_str(&format!("+ {text}\n"));
            } else if has_class(line, "blob-code-deletion") {
                out.push_str(&format!("- {text}\n"));
            }
        }

        out.push('\n');
    }

    if out.is_empty() {
        Some(EMPTY_DIFF_DATA.to_string())
    } else {
        Some(out)
    }
}

/// The owning file name: nearest `.js-file` ancestor's `.file-header`
/// `data-path`, falling back to the nearest `.file` ancestor.
fn file_name_for(container: ElementRef<'_>) -> Option<String> {
    closest(container, "js-file")
        .and_then(header_path)
        .or_else(|| closest(container, "file").and_then(header_path))
}

fn closest<'a>(el: ElementRef<'a>, class: &str) -> Option<ElementRef<'a>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| has_class(*ancestor, class))
}

fn header_path(scope: ElementRef<'_>) -> Option<String> {
    scope
        .select(&selectors::FILE_HEADER)
        .next()
        .and_then(|header| header.value().attr("data-path"))
        .map(str::to_string)
}

fn has_class(el: ElementRef<'_>, name: &str) -> bool {
    el.value().classes().any(|class| class == name)
}
