use cart_agent::config::AgentConfig;
use cart_agent::{CartAgent, FileStorage, HtmlDocument, browser};
use clap::Parser;
use std::error::Error;
use url::Url;

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    if let Err(e) = run(args).await {
        ::log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Resolves the configuration from the file, the environment and the arguments
fn load_config(args: &Args) -> Result<AgentConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => AgentConfig::from_file(path)?,
        None => AgentConfig::default(),
    };

    // Override the WebDriver URL with an environment variable if provided
    if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
        if !webdriver_url.is_empty() {
            config.webdriver_url = webdriver_url;
        }
    }

    if let Some(store) = &args.store {
        config.storage_path = store.clone();
    }
    if let Some(webdriver_url) = &args.webdriver_url {
        config.webdriver_url = webdriver_url.clone();
    }
    Ok(config)
}

async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = load_config(&args)?;
    ::log::info!("Using cart storage at {}", config.storage_path.display());

    let agent = CartAgent::new(FileStorage::new(&config.storage_path)).with_config(&config);

    let panel = if let Some(id) = &args.remove {
        agent.remove(id)
    } else if let Some(url) = &args.url {
        let doc = match &args.html {
            Some(path) => {
                let source = std::fs::read_to_string(path)?;
                HtmlDocument::parse(&source, Url::parse(url)?)
            }
            None => browser::fetch_rendered(&config.webdriver_url, url).await?,
        };
        agent.visit(&doc)
    } else {
        agent.panel()
    };

    print!("{}", panel);
    Ok(())
}
