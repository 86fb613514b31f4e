// src/extractors/infobox.rs

use super::inline::{resolve, InlineText};
use crate::wiki::{Fact, FactValue, SiteConfig};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{node::Node, ElementRef, Selector};

// --- CSS Selectors (Lazy Static) ---
static DATA_ITEM_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".pi-item.pi-data").expect("Failed to compile DATA_ITEM_SELECTOR")
});

static LABEL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".pi-data-label").expect("Failed to compile LABEL_SELECTOR")
});

static VALUE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".pi-data-value").expect("Failed to compile VALUE_SELECTOR")
});

// Non-nested and lazy: "(a (b) c)" splits at the first ')'.
static PARENTHETICAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(.*?\)").expect("Failed to compile PARENTHETICAL_RE")
});

/// Parses every labelled data row of one infobox sidebar.
pub fn parse_infobox(aside: ElementRef, site: &SiteConfig) -> Vec<Fact> {
    let mut facts = Vec::new();

    for item in aside.select(&DATA_ITEM_SELECTOR) {
        let (Some(label), Some(value)) = (
            item.select(&LABEL_SELECTOR).next(),
            item.select(&VALUE_SELECTOR).next(),
        ) else {
            tracing::trace!("Skipping infobox item without label or value");
            continue;
        };

        let values = match sole_list_child(value) {
            Some(list) => list
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|child| child.value().name() == "li")
                .map(|child| parse_value_item(child, site))
                .collect(),
            None => vec![parse_value_item(value, site)],
        };

        facts.push(Fact {
            key: label.text().collect::<String>().trim().to_string(),
            values,
        });
    }

    facts
}

/// Returns the list when it is the value cell's only child, ignoring
/// whitespace between tags.
fn sole_list_child(value: ElementRef) -> Option<ElementRef> {
    let mut significant = value.children().filter(|child| match child.value() {
        Node::Text(text) => !text.trim().is_empty(),
        Node::Comment(_) => false,
        _ => true,
    });

    let only = significant.next()?;
    if significant.next().is_some() {
        return None;
    }
    ElementRef::wrap(only).filter(|el| matches!(el.value().name(), "ul" | "ol"))
}

/// Splits one value into its main text and first parenthetical annotation.
/// The split runs on the placeholder template so a link inside the
/// parentheses stays with the annotation.
pub fn parse_value_item(item: ElementRef, site: &SiteConfig) -> FactValue {
    let inline = InlineText::tokenize(item, site);
    let template = inline.template();

    let value = PARENTHETICAL_RE.replace_all(&template, "").to_string();
    let extra = PARENTHETICAL_RE
        .find(&template)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    FactValue {
        value_text: resolve(&value, &inline.links),
        value: value.trim().to_string(),
        extra_text: resolve(&extra, &inline.links),
        extra,
        body: inline.body(),
        text: inline.text(),
        links: inline.links,
    }
}
