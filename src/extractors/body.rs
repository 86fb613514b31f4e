// src/extractors/body.rs

use super::inline::InlineText;
use super::sections::SectionTracker;
use crate::utils::error::ExtractError;
use crate::wiki::{Paragraph, SiteConfig};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};

// Containers and decorations that carry no article prose of their own.
const IGNORED_TAGS: &[&str] = &[
    "div", "section", "nav", "table", "script", "style", "noscript",
    "br", "hr", "aside", "figure", "dl",
];

// Bare inline nodes directly under the content root are a known quirk of
// the archived markup and are skipped.
const STRAY_INLINE_TAGS: &[&str] = &["a", "span"];

static HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^h([1-9])$").expect("Failed to compile HEADING_RE")
});

static LISTING_LABEL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".category-page__first-char")
        .expect("Failed to compile LISTING_LABEL_SELECTOR")
});

/// Walks article content in document order, producing one [`Paragraph`]
/// per paragraph, quote or list item.
pub struct BodyWalker<'s> {
    site: &'s SiteConfig,
    paragraphs: Vec<Paragraph>,
}

impl<'s> BodyWalker<'s> {
    pub fn new(site: &'s SiteConfig) -> Self {
        Self { site, paragraphs: Vec::new() }
    }

    /// Dispatches every direct child of `root`.
    pub fn walk(&mut self, root: ElementRef, tracker: &mut SectionTracker) -> Result<(), ExtractError> {
        for child in root.children() {
            let Some(element) = ElementRef::wrap(child) else { continue };
            let name = element.value().name();

            if let Some(level) = heading_level(name) {
                let title = element.text().collect::<String>();
                tracing::trace!("Entering h{} '{}'", level, title.trim());
                tracker.enter_heading(level, title.trim());
            } else if name == "ul" || name == "ol" {
                self.process_list(element, tracker);
            } else if name == "p" || name == "blockquote" {
                self.process_unit(element, tracker.current_path());
            } else if IGNORED_TAGS.contains(&name) || STRAY_INLINE_TAGS.contains(&name) {
                continue;
            } else {
                return Err(ExtractError::UnexpectedNode {
                    tag: name.to_string(),
                    context: "article body",
                });
            }
        }
        Ok(())
    }

    /// Walks one flat member listing. The section path is reset to the page
    /// title plus the listing's current letter label.
    pub fn walk_listing(&mut self, listing: ElementRef, tracker: &mut SectionTracker) -> Result<(), ExtractError> {
        tracker.enter_listing();

        for child in listing.children() {
            let Some(element) = ElementRef::wrap(child) else { continue };
            let name = element.value().name();

            if LISTING_LABEL_SELECTOR.matches(&element) {
                let label = element.text().collect::<String>();
                tracker.set_label(label.trim());
            } else if name == "ul" || name == "ol" {
                self.process_list(element, tracker);
            } else if IGNORED_TAGS.contains(&name) {
                continue;
            } else {
                return Err(ExtractError::UnexpectedNode {
                    tag: name.to_string(),
                    context: "category listing",
                });
            }
        }
        Ok(())
    }

    fn process_list(&mut self, list: ElementRef, tracker: &SectionTracker) {
        for item in list.children().filter_map(ElementRef::wrap) {
            if item.value().name() == "li" {
                self.process_unit(item, tracker.current_path());
            }
        }
    }

    fn process_unit(&mut self, element: ElementRef, section_path: Vec<String>) {
        let inline = InlineText::tokenize(element, self.site);
        self.paragraphs.push(Paragraph {
            section_path,
            body: inline.body(),
            text: inline.text(),
            links: inline.links,
        });
    }

    pub fn into_paragraphs(self) -> Vec<Paragraph> {
        self.paragraphs
    }
}

fn heading_level(name: &str) -> Option<usize> {
    HEADING_RE
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|level| level.as_str().parse().ok())
}
