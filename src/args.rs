use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cart-agent")]
#[command(about = "Adds the product on a page to a persistent cart and shows the cart")]
#[command(version)]
pub struct Args {
    /// Product page URL to add to the cart (omit to only show the cart)
    pub url: Option<String>,

    /// Read the page from a saved HTML file instead of a WebDriver session
    #[arg(long, requires = "url")]
    pub html: Option<PathBuf>,

    /// Remove the product with this id from the cart
    #[arg(short, long, conflicts_with = "url")]
    pub remove: Option<String>,

    /// Path to an agent configuration file (JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the storage file location
    #[arg(short, long)]
    pub store: Option<PathBuf>,

    /// Override the WebDriver URL
    #[arg(long)]
    pub webdriver_url: Option<String>,
}
