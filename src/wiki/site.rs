// src/wiki/site.rs

// --- Defaults for the archived Avatar wiki ---
const DEFAULT_SOURCE_PREFIX: &str = "avatar.wikia.com/wiki/";
const DEFAULT_FILE_EXTENSION: &str = ".html";
const DEFAULT_TITLE_SUFFIX: &str = " | Avatar Wiki | FANDOM powered by Wikia";
const DEFAULT_LINK_ROOT: &str = "/wiki/";
const DEFAULT_DOMAINS: &[&str] = &["avatar.wikia.com", "avatar.fandom.com"];

// Namespaces that hold wiki plumbing rather than articles.
const DEFAULT_META_PREFIXES: &[&str] = &[
    "Avatar_Wiki:",
    "Blog:",
    "User_blog:",
    "Forum:",
    "Forum_",
    "Special:",
    "Template:",
    "MediaWiki:",
    "Board:",
    "Board_Thread:",
    "Thread:",
    "Topic:",
];

/// Site-specific naming rules shared by every stage of extraction.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub source_prefix: String,
    pub file_extension: String,
    pub title_suffix: String,
    pub link_root: String,
    pub domains: Vec<String>,
    pub meta_prefixes: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            source_prefix: DEFAULT_SOURCE_PREFIX.to_string(),
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
            title_suffix: DEFAULT_TITLE_SUFFIX.to_string(),
            link_root: DEFAULT_LINK_ROOT.to_string(),
            domains: DEFAULT_DOMAINS.iter().map(|d| d.to_string()).collect(),
            meta_prefixes: DEFAULT_META_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl SiteConfig {
    /// Derives the page id from a file path or URL-like identifier:
    /// everything up to the site prefix and the trailing extension go.
    pub fn page_id(&self, source: &str) -> String {
        let tail = match source.find(&self.source_prefix) {
            Some(pos) => &source[pos + self.source_prefix.len()..],
            None => source,
        };
        tail.strip_suffix(self.file_extension.as_str())
            .unwrap_or(tail)
            .to_string()
    }

    pub fn is_meta_page(&self, page_id: &str) -> bool {
        self.meta_prefixes.iter().any(|prefix| page_id.starts_with(prefix.as_str()))
    }

    pub fn page_title(&self, raw_title: &str) -> String {
        raw_title.replace(&self.title_suffix, "").trim().to_string()
    }

    /// Removes the file extension wherever it appears in an href
    /// (`Aang.html#Early_life` becomes `Aang#Early_life`). Only applied to
    /// hrefs that stay on the wiki.
    pub fn normalize_href(&self, href: &str) -> String {
        if self.file_extension.is_empty() {
            return href.to_string();
        }
        href.replace(&self.file_extension, "")
    }

    pub fn is_own_host(&self, host: &str) -> bool {
        self.domains.iter().any(|domain| host.eq_ignore_ascii_case(domain))
    }
}

/// Splits an absolute (`http://`, `https://`) or protocol-relative (`//`)
/// URL into its host and the remaining path. Relative hrefs give `None`.
pub fn split_host(href: &str) -> Option<(&str, &str)> {
    let rest = href
        .strip_prefix("https://")
        .or_else(|| href.strip_prefix("http://"))
        .or_else(|| href.strip_prefix("//"))?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    Some(rest.split_at(end))
}
