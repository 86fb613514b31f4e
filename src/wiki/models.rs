// src/wiki/models.rs
use serde::Serialize;

/// Where a document came from and what it is called.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    #[serde(rename = "page")]
    pub page_id: String,
    #[serde(rename = "canonical")]
    pub canonical_url: String,
    pub file: String,
    pub title: String,
}

/// One extracted article page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub source: Source,
    pub paragraphs: Vec<Paragraph>,
    pub categories: Vec<Link>,
    pub facts: Vec<Fact>,
}

impl Document {
    pub fn page_id(&self) -> &str {
        &self.source.page_id
    }
}

/// A block-level unit of article text (paragraph, quote or list item).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    /// Enclosing headings, outermost first. Always starts with the page title.
    pub section_path: Vec<String>,
    /// Flattened text with `${link_N}` placeholders still in place.
    pub body: String,
    /// `body` with every placeholder replaced by its link text.
    pub text: String,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Referenced page id, fragment removed.
    pub target_page: String,
    pub href: String,
    pub external: bool,
    pub body: String,
}

/// One infobox row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fact {
    pub key: String,
    pub values: Vec<FactValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactValue {
    pub value: String,
    pub value_text: String,
    pub extra: String,
    pub extra_text: String,
    pub body: String,
    pub text: String,
    pub links: Vec<Link>,
}
