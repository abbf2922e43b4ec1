//! End-to-end flow over the captured compare-page fixture: affordance
//! injection, diff extraction, composition, and the click handler.

use std::sync::Arc;

use async_trait::async_trait;

use gh_pr_helper::config::Config;
use gh_pr_helper::describe::{
    BackendError, Composer, DescriptionBackend, GenerationRequest, GenerationResponse,
    DIFF_PLACEHOLDER,
};
use gh_pr_helper::page::{watcher, ButtonState, HostPage, StaticPage};
use gh_pr_helper::session::Session;

const COMPARE_PAGE: &str = include_str!("fixtures/compare_page.html");
const PAGE_PATH: &str = "/github/sample/compare/main...feature";

/// Collaborator that answers every request with a fixed description and
/// records what it was asked.
struct RecordingBackend {
    description: &'static str,
    requests: std::sync::Mutex<Vec<GenerationRequest>>,
}

impl RecordingBackend {
    fn new(description: &'static str) -> Self {
        Self {
            description,
            requests: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl DescriptionBackend for RecordingBackend {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, BackendError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(GenerationResponse {
            generated_description: Some(self.description.to_string()),
        })
    }
}

struct UnavailableBackend;

#[async_trait]
impl DescriptionBackend for UnavailableBackend {
    async fn generate(
        &self,
        _request: &GenerationRequest,
    ) -> Result<GenerationResponse, BackendError> {
        Err(BackendError::InvalidResponse("connection refused".to_string()))
    }
}

fn fixture_page() -> StaticPage {
    StaticPage::new(PAGE_PATH, COMPARE_PAGE)
}

#[test]
fn affordance_injection_is_idempotent_on_the_fixture() {
    let mut page = fixture_page();
    assert!(watcher::ensure_affordance(&mut page));
    assert!(!watcher::ensure_affordance(&mut page));
    assert!(page.snapshot().unwrap().has_affordance());
}

#[tokio::test]
async fn click_with_backend_writes_the_backend_description_verbatim() {
    let backend = Arc::new(RecordingBackend::new("AI-written description"));
    let session = Session::new(Composer::new(Some(backend.clone()), Config::default()));

    let mut page = fixture_page();
    watcher::ensure_affordance(&mut page);
    session.handle_click(&mut page).await;

    assert_eq!(page.description(), Some("AI-written description"));
    assert_eq!(page.input_events(), 1);
    assert_eq!(page.button_state(), ButtonState::Idle);

    // The collaborator saw the extracted diff and page metadata.
    let requests = backend.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.pr_title, "Add OAuth2 login flow");
    assert_eq!(request.branch_info, "main...feature/oauth-login");
    assert!(request.diff_data.contains("## src/auth.rs"));
    assert!(request.diff_data.contains("## src/routes.rs"));
    assert!(request
        .diff_data
        .contains("+ routes.add(\"/oauth/callback\", oauth_callback);"));
    assert!(request.diff_data.contains("- fn login() -> Session {"));
    // Context lines never appear in the extracted diff.
    assert!(!request.diff_data.contains("SessionStore::open"));
}

#[tokio::test]
async fn click_without_backend_composes_the_fallback_template() {
    let session = Session::new(Composer::new(None, Config::default()));

    let mut page = fixture_page();
    session.handle_click(&mut page).await;

    let description = page.description().unwrap();
    assert!(description.starts_with("# Add OAuth2 login flow"));
    assert!(description.contains("This PR includes changes to the codebase."));
    // The fixture diff is longer than the 200-character inline limit.
    assert!(description.contains(DIFF_PLACEHOLDER));
    assert!(description.contains("- Branch information: main...feature/oauth-login"));
}

#[tokio::test]
async fn unavailable_backend_degrades_to_the_fallback_template() {
    let session = Session::new(Composer::new(
        Some(Arc::new(UnavailableBackend)),
        Config::default(),
    ));

    let mut page = fixture_page();
    session.handle_click(&mut page).await;

    let description = page.description().unwrap();
    assert!(description.starts_with("# Add OAuth2 login flow"));
    assert!(description.ends_with("Please edit as needed.*"));
    assert!(page.alerts().is_empty());
    assert_eq!(page.button_state(), ButtonState::Idle);
}

#[tokio::test]
async fn empty_compare_page_still_produces_a_description() {
    let session = Session::new(Composer::new(None, Config::default()));

    let mut page = StaticPage::new(
        "/github/sample/compare/main...empty",
        r#"<body>
             <textarea name="pull_request[body]"></textarea>
           </body>"#,
    );
    session.handle_click(&mut page).await;

    let description = page.description().unwrap();
    // No containers and no files tab: the sentinel flows into the template.
    assert!(description
        .contains("No diff data found. Make sure you have committed changes to compare."));
    assert!(description.starts_with("# Pull Request Description"));
    assert!(description.contains("- Branch information: Not available"));
}
