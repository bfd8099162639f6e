use scraper::{Html, Selector};

pub const DEFAULT_ITEM_SELECTOR: &str = "a.targets-list-item";
pub const DEFAULT_CODENAME_SELECTOR: &str = "h4.target-tooltip-codename-header";

/// One matched target anchor, as found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetElement {
    /// Raw `href` attribute, untouched.
    pub href: Option<String>,
    /// Trimmed text of the first nested codename header.
    pub codename: Option<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid {role} selector {selector:?}: {message}")]
pub struct SelectorError {
    pub role: &'static str,
    pub selector: String,
    pub message: String,
}

/// CSS selectors locating target anchors and the codename header inside each.
#[derive(Debug, Clone)]
pub struct TargetSelectors {
    item: Selector,
    codename: Selector,
}

impl TargetSelectors {
    pub fn parse(item: &str, codename: &str) -> Result<Self, SelectorError> {
        Ok(Self {
            item: compile("item", item)?,
            codename: compile("codename", codename)?,
        })
    }
}

impl Default for TargetSelectors {
    fn default() -> Self {
        Self {
            item: Selector::parse(DEFAULT_ITEM_SELECTOR).expect("default item selector is valid"),
            codename: Selector::parse(DEFAULT_CODENAME_SELECTOR)
                .expect("default codename selector is valid"),
        }
    }
}

fn compile(role: &'static str, selector: &str) -> Result<Selector, SelectorError> {
    Selector::parse(selector).map_err(|err| SelectorError {
        role,
        selector: selector.to_string(),
        message: err.to_string(),
    })
}

/// Collect every target element in document order.
pub fn parse_targets(html: &str, selectors: &TargetSelectors) -> Vec<TargetElement> {
    let doc = Html::parse_document(html);
    doc.select(&selectors.item)
        .map(|anchor| {
            let href = anchor.value().attr("href").map(str::to_string);
            let codename = anchor
                .select(&selectors.codename)
                .next()
                .map(|header| header.text().collect::<String>().trim().to_string());
            TargetElement { href, codename }
        })
        .collect()
}
