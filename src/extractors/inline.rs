// src/extractors/inline.rs

use super::links;
use crate::wiki::{Link, SiteConfig};
use scraper::{node::Node, ElementRef};

/// One piece of a flattened text unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    /// Index into the unit's link list.
    Link(usize),
}

/// Flattened text of one element with its content links pulled out.
///
/// Links that pass [`links::classify`] become [`Segment::Link`] entries in
/// document order; filtered anchors stay behind as literal text. The tree is
/// never modified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineText {
    pub segments: Vec<Segment>,
    pub links: Vec<Link>,
}

impl InlineText {
    pub fn tokenize(element: ElementRef, site: &SiteConfig) -> Self {
        let mut inline = InlineText::default();
        inline.collect(element, site);
        inline
    }

    fn collect(&mut self, element: ElementRef, site: &SiteConfig) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => self.push_literal(text),
                Node::Element(_) => {
                    let Some(child_el) = ElementRef::wrap(child) else { continue };
                    if child_el.value().name() == "a" {
                        if let Some(link) = links::classify(child_el, site) {
                            self.segments.push(Segment::Link(self.links.len()));
                            self.links.push(link);
                            continue;
                        }
                    }
                    self.collect(child_el, site);
                }
                _ => {}
            }
        }
    }

    fn push_literal(&mut self, text: &str) {
        if let Some(Segment::Literal(last)) = self.segments.last_mut() {
            last.push_str(text);
        } else {
            self.segments.push(Segment::Literal(text.to_string()));
        }
    }

    /// The untrimmed flattened text with `${link_N}` placeholders.
    pub fn template(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.clone(),
                Segment::Link(index) => placeholder(*index),
            })
            .collect()
    }

    /// Trimmed template, used as the content fingerprint.
    pub fn body(&self) -> String {
        self.template().trim().to_string()
    }

    /// Readable text with link bodies substituted back in.
    pub fn text(&self) -> String {
        resolve(&self.template(), &self.links)
    }
}

pub fn placeholder(index: usize) -> String {
    format!("${{link_{}}}", index)
}

/// Replaces each link's placeholder with its visible text, then trims.
pub fn resolve(text: &str, links: &[Link]) -> String {
    let mut resolved = text.to_string();
    for (index, link) in links.iter().enumerate() {
        resolved = resolved.replace(&placeholder(index), &link.body);
    }
    resolved.trim().to_string()
}
