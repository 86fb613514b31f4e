// src/extractors/links.rs

use crate::wiki::site::split_host;
use crate::wiki::{Link, SiteConfig};
use scraper::ElementRef;

// Parent classes that mark navigation chrome rather than article content.
const CHROME_PARENT_CLASSES: &[&str] = &[
    "reference-text",                     // footnote bodies
    "wds-global-footer__links-list-item", // site footer
    "page-header__categories-links",      // category strip in the page header
];

/// Decides whether an anchor is a content link and, if so, normalizes it.
///
/// Returns `None` for empty or missing hrefs, same-page anchors, thread
/// links, revision/editor links and anchors sitting in site chrome.
pub fn classify(anchor: ElementRef, site: &SiteConfig) -> Option<Link> {
    let body = anchor.text().collect::<String>().trim().to_string();
    let raw_href = anchor.value().attr("href").unwrap_or("");
    let href = site.normalize_href(raw_href);

    if body.is_empty() || href.is_empty() {
        return None;
    }
    if href.starts_with('#') || href.starts_with("Thread") {
        return None;
    }
    if href.contains("?oldid=") || href.contains("?openEditor=") {
        return None;
    }
    if has_chrome_parent(anchor) {
        tracing::trace!("Skipping chrome link: {}", href);
        return None;
    }

    // On-site URLs are decided by host; off-site ones keep the href as written.
    let path = match split_host(&href) {
        Some((host, path)) if site.is_own_host(host) => path,
        Some(_) => {
            return Some(Link {
                target_page: before_hash(raw_href).to_string(),
                href: raw_href.to_string(),
                external: true,
                body,
            });
        }
        None => href.as_str(),
    };

    let path = path
        .strip_prefix(site.link_root.as_str())
        .unwrap_or_else(|| path.trim_start_matches('/'));
    Some(internal_link(path, body, site))
}

fn internal_link(path: &str, body: String, site: &SiteConfig) -> Link {
    Link {
        target_page: before_hash(path).to_string(),
        href: format!("{}{}", site.link_root, path),
        external: false,
        body,
    }
}

fn has_chrome_parent(anchor: ElementRef) -> bool {
    anchor
        .parent()
        .and_then(ElementRef::wrap)
        .map(|parent| {
            parent
                .value()
                .classes()
                .any(|class| CHROME_PARENT_CLASSES.contains(&class))
        })
        .unwrap_or(false)
}

fn before_hash(href: &str) -> &str {
    href.split('#').next().unwrap_or(href)
}
