use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use gazette::app::Session;
use gazette::config::Config;
use gazette::content::{ContentSource, ContentStore};
use gazette::router::ViewState;
use gazette::state::StateStore;

/// Get the config directory path (~/.config/gazette/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("gazette"))
}

#[derive(Parser, Debug)]
#[command(name = "gazette", about = "Article site engine: renders a route's page HTML")]
struct Args {
    /// Route to render, as a URL query string (e.g. "?article=2",
    /// "?search=zero+trust", "?page=categories"). Empty means home.
    #[arg(default_value = "")]
    route: String,

    /// Base URL of the article data source (overrides the config file).
    #[arg(long, value_name = "URL")]
    data_url: Option<String>,

    /// Directory holding config.toml and state.json.
    #[arg(long, value_name = "DIR")]
    state_dir: Option<PathBuf>,

    /// Also print the sidebar menu HTML.
    #[arg(long)]
    menu: bool,

    /// Write the page HTML to a file instead of stdout.
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_dir = match &args.state_dir {
        Some(dir) => dir.clone(),
        None => get_config_dir()?,
    };
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
    }

    let mut config =
        Config::load(&config_dir.join("config.toml")).context("Failed to load configuration")?;
    if args.data_url.is_some() {
        config.data_url = args.data_url.clone();
    }

    let client = reqwest::Client::new();
    let store = Arc::new(ContentStore::new(client, config.data_url.clone()));
    let state = StateStore::load(config_dir.join("state.json"), config.prefers_dark);

    let mut session = Session::new(store.clone(), state, config);
    session.start(&args.route).await;

    if store.source().await == ContentSource::Fallback {
        tracing::info!("Serving embedded fallback content");
    }
    tracing::debug!(
        route = %args.route,
        resolved = ?ViewState::parse(&args.route),
        "Route rendered"
    );

    let mut page = String::new();
    page.push_str(&format!("<!-- {} -->\n", session.page_title()));
    if args.menu {
        page.push_str(&session.menu_html().await);
        page.push('\n');
    }
    page.push_str(session.surface_html());
    page.push('\n');

    match &args.out {
        Some(path) => {
            std::fs::write(path, &page)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => print!("{page}"),
    }

    Ok(())
}
