use serde::{Deserialize, Serialize};

/// Placeholder codename used when a target has no codename header yet.
pub const CODENAME_NOT_FOUND: &str = "No codename found";

/// One captured target: its `href` (unique key) and human readable codename.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub href: String,
    pub codename: String,
}

impl Item {
    pub fn new(href: impl Into<String>, codename: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            codename: codename.into(),
        }
    }
}
