use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use stanza::Server;
use stanza::catalog::Catalog;
use stanza::config::SiteConfig;
use stanza::content;
use stanza::middleware::CliBanner;
use stanza::pages::{self, Site};

#[derive(Parser)]
#[command(name = "stanza", about = "Serve the site described by stanza.yaml")]
struct Args {
    /// Path to the site config file.
    #[arg(long, default_value = "stanza.yaml")]
    config: PathBuf,

    /// Bind address, overriding the config.
    #[arg(long)]
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = SiteConfig::load(&args.config)?;
    let posts = content::load_posts(&config.content_dir.join("posts"))?;
    let projects = content::load_projects(&config.content_dir.join("projects"))?;
    info!(posts = posts.len(), projects = projects.len(), "content loaded");

    let addr = args.addr.unwrap_or_else(|| config.addr.clone());
    let cli = CliBanner::new(&config.cli_clients);
    let site = Arc::new(Site { config, catalog: Catalog::new(posts, projects) });

    let app = pages::router(Arc::clone(&site)).layer(cli);
    Server::bind(&addr).serve(app).await?;
    Ok(())
}
