use crate::document::HtmlDocument;
use fantoccini::{Client, ClientBuilder};
use std::error::Error;

/// Addresses tried when the configured WebDriver is not reachable
const FALLBACK_WEBDRIVER_URLS: [&str; 2] = [
    "http://localhost:9515", // ChromeDriver default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// Connects to the WebDriver instance, trying common alternatives on failure
async fn connect_to_webdriver(webdriver_url: &str) -> Result<Client, Box<dyn Error>> {
    match ClientBuilder::native().connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Ok(client);
        }
        Err(e) => {
            ::log::warn!(
                "Failed to connect to WebDriver at {}: {}",
                webdriver_url,
                e
            );
        }
    }

    for url in FALLBACK_WEBDRIVER_URLS {
        if url == webdriver_url {
            continue;
        }
        ::log::debug!("Trying fallback WebDriver at {}", url);
        if let Ok(client) = ClientBuilder::native().connect(url).await {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Ok(client);
        }
    }

    Err(format!(
        "no WebDriver reachable at {} or fallbacks; start one or set WEBDRIVER_URL",
        webdriver_url
    )
    .into())
}

/// Loads `url` in a browser session and snapshots the rendered document.
///
/// The snapshot's location is the browser's final URL, so redirects are
/// reflected in the product identity.
pub async fn fetch_rendered(webdriver_url: &str, url: &str) -> Result<HtmlDocument, Box<dyn Error>> {
    let client = connect_to_webdriver(webdriver_url).await?;

    let snapshot = async {
        client.goto(url).await?;
        let source = client.source().await?;
        let location = client.current_url().await?;
        Ok::<_, fantoccini::error::CmdError>((source, location))
    }
    .await;

    if let Err(e) = client.close().await {
        ::log::debug!("Failed to close WebDriver session: {}", e);
    }

    let (source, location) = snapshot?;
    ::log::info!("Rendered {} ({} bytes)", location, source.len());
    Ok(HtmlDocument::parse(&source, location))
}
