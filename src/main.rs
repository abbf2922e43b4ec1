use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use gh_pr_helper::config::Config;
use gh_pr_helper::describe::{Composer, DescriptionBackend, HttpBackend};
use gh_pr_helper::page::{self, watcher, StaticPage};
use gh_pr_helper::session::Session;

/// gh-pr-helper — generates a pull request description from a captured GitHub
/// compare/PR-creation page, delegating to a configured AI backend when one
/// is reachable and falling back to a deterministic template otherwise.
#[derive(Parser, Debug)]
#[command(name = "gh-pr-helper", version, about)]
struct Cli {
    /// Captured page HTML (e.g., a saved github.com compare page)
    ///
    /// Not required when --mock is used.
    page: Option<PathBuf>,

    /// URL of the captured page, used for the PR-creation-page check
    #[arg(long)]
    url: Option<String>,

    /// Optional output file path for the generated description
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Use a built-in sample compare page for demo purposes
    #[arg(long)]
    r#mock: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let (path, html) = if cli.r#mock {
        info!("using built-in sample compare page");
        (
            "/github/sample/compare/main...feature".to_string(),
            include_str!("../tests/fixtures/compare_page.html").to_string(),
        )
    } else {
        let page_file = cli.page.as_deref().ok_or(
            "Page HTML file is required unless --mock is used. \
             Usage: gh-pr-helper <page.html> --url <url> or gh-pr-helper --mock",
        )?;
        let url = cli
            .url
            .as_deref()
            .ok_or("--url is required unless --mock is used")?;
        let path = page_path(url);
        debug!(%path, file = %page_file.display(), "loading captured page");
        (path, std::fs::read_to_string(page_file)?)
    };

    if !page::is_pr_creation_page(&path) {
        return Err(format!(
            "{path} is not a PR creation page (expected a path containing /compare or /pull/new)"
        )
        .into());
    }

    info!("loading configuration");
    let config = Config::load()?;

    let backend = config.backend.endpoint.clone().map(|endpoint| {
        Arc::new(HttpBackend::new(endpoint, config.backend_token()))
            as Arc<dyn DescriptionBackend>
    });
    if backend.is_none() {
        info!("no backend endpoint configured, the fallback template will be used");
    }

    let mut page = StaticPage::new(path, html);
    let injected = watcher::ensure_affordance(&mut page);
    debug!(injected, "initial affordance check");

    let session = Session::new(Composer::new(backend, config));
    info!("generating description");
    session.handle_click(&mut page).await;

    match page.description() {
        Some(text) => write_output(text, cli.output.as_deref())?,
        None => return Err("No description was generated".into()),
    }

    Ok(())
}

/// Derive the URL path for the page predicate. Bare paths are accepted as-is
/// so `--url /org/repo/compare/main...feature` works without a scheme.
fn page_path(url: &str) -> String {
    match reqwest::Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.to_string(),
    }
}

fn write_output(text: &str, path: Option<&Path>) -> Result<(), std::io::Error> {
    match path {
        Some(path) => {
            std::fs::write(path, text)?;
            println!(
                "{} {}",
                "Description written to".green().bold(),
                path.display()
            );
        }
        None => {
            println!("{}", "Generated description:".green().bold());
            println!();
            println!("{text}");
        }
    }
    Ok(())
}
