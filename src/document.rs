use crate::utils::collapse_whitespace;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Selector for the product name
const HEADING_SELECTOR: &str = "h1";

/// Selector for the price element: an explicit `price` class or any class containing it
const PRICE_SELECTOR: &str = r#".price, [class*="price"]"#;

/// Selector for the product image
const IMAGE_SELECTOR: &str = "img";

/// Read-only view of a rendered page.
///
/// Each query returns the first match in document order, or `None` when the
/// page has no such element.
pub trait DocumentReader {
    /// Rendered text of the first `h1`
    fn heading_text(&self) -> Option<String>;

    /// Rendered text of the first price-like element
    fn price_text(&self) -> Option<String>;

    /// Resolved source URL of the first `img`
    fn image_source(&self) -> Option<String>;

    /// Current location of the document
    fn location(&self) -> &Url;
}

/// A parsed HTML snapshot together with the location it was loaded from
pub struct HtmlDocument {
    html: Html,
    location: Url,
}

impl HtmlDocument {
    /// Parses a full HTML document loaded from `location`
    pub fn parse(source: &str, location: Url) -> Self {
        Self {
            html: Html::parse_document(source),
            location,
        }
    }

    fn select_first(&self, css: &str) -> Option<ElementRef<'_>> {
        let selector = match Selector::parse(css) {
            Ok(selector) => selector,
            Err(e) => {
                ::log::error!("Invalid selector {:?}: {}", css, e);
                return None;
            }
        };
        self.html.select(&selector).next()
    }
}

/// Elements whose text is never rendered
const HIDDEN_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Elements that break the line around their content
const BREAKING_TAGS: [&str; 14] = [
    "br", "p", "div", "li", "ul", "ol", "tr", "td", "th", "section", "header", "footer",
    "h2", "h3",
];

/// Text of an element as a user would see it, whitespace collapsed
fn rendered_text(element: ElementRef<'_>) -> String {
    let mut text = String::new();
    collect_text(element, &mut text);
    collapse_whitespace(&text)
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            let name = child.value().name();
            if HIDDEN_TAGS.contains(&name) {
                continue;
            }

            let breaks = BREAKING_TAGS.contains(&name);
            if breaks {
                out.push(' ');
            }
            collect_text(child, out);
            if breaks {
                out.push(' ');
            }
        }
    }
}

impl DocumentReader for HtmlDocument {
    fn heading_text(&self) -> Option<String> {
        self.select_first(HEADING_SELECTOR).map(rendered_text)
    }

    fn price_text(&self) -> Option<String> {
        self.select_first(PRICE_SELECTOR).map(rendered_text)
    }

    fn image_source(&self) -> Option<String> {
        let src = self.select_first(IMAGE_SELECTOR)?.value().attr("src")?.trim();
        if src.is_empty() {
            return None;
        }

        match self.location.join(src) {
            Ok(resolved) => Some(resolved.to_string()),
            Err(e) => {
                ::log::debug!("Keeping unresolvable image source {:?}: {}", src, e);
                Some(src.to_string())
            }
        }
    }

    fn location(&self) -> &Url {
        &self.location
    }
}

/// A document whose query results are supplied directly.
///
/// Useful for hosts that run the DOM queries themselves and for fixtures.
#[derive(Debug, Clone)]
pub struct StaticDocument {
    pub location: Url,
    pub heading: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
}

impl StaticDocument {
    /// Creates an empty document at `location`
    pub fn new(location: Url) -> Self {
        Self {
            location,
            heading: None,
            price: None,
            image: None,
        }
    }

    pub fn with_heading(mut self, heading: &str) -> Self {
        self.heading = Some(heading.to_string());
        self
    }

    pub fn with_price(mut self, price: &str) -> Self {
        self.price = Some(price.to_string());
        self
    }

    pub fn with_image(mut self, image: &str) -> Self {
        self.image = Some(image.to_string());
        self
    }
}

impl DocumentReader for StaticDocument {
    fn heading_text(&self) -> Option<String> {
        self.heading.clone()
    }

    fn price_text(&self) -> Option<String> {
        self.price.clone()
    }

    fn image_source(&self) -> Option<String> {
        self.image.clone()
    }

    fn location(&self) -> &Url {
        &self.location
    }
}
