// src/extractors/document.rs

// --- Imports ---
use super::body::BodyWalker;
use super::infobox;
use super::links;
use super::sections::SectionTracker;
use crate::utils::error::ExtractError;
use crate::wiki::{Document, Link, Paragraph, SiteConfig, Source};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::fs;

// --- CSS Selectors (Lazy Static) ---
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("title").expect("Failed to compile TITLE_SELECTOR")
});

// Purely stylistic wrappers; the tag goes, the content stays.
static UNWRAP_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("i, b, em, small, center").expect("Failed to compile UNWRAP_SELECTOR")
});

// Footnote markers, embedded comment threads and listing decorations.
static REMOVE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(
        ".reference, #WikiaArticleComments, #article-comments, \
         .category-page__alphabet-shortcuts, .category-page__total-number",
    )
    .expect("Failed to compile REMOVE_SELECTOR")
});

static ARTICLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("#WikiaArticle").expect("Failed to compile ARTICLE_SELECTOR")
});

static TEXT_CONTAINER_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("#mw-content-text").expect("Failed to compile TEXT_CONTAINER_SELECTOR")
});

static CANONICAL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[property="og:url"]"#).expect("Failed to compile CANONICAL_SELECTOR")
});

static LISTING_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".category-page__members").expect("Failed to compile LISTING_SELECTOR")
});

static CATEGORY_LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("#articleCategories .categories a").expect("Failed to compile CATEGORY_LINK_SELECTOR")
});

static INFOBOX_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("aside.portable-infobox").expect("Failed to compile INFOBOX_SELECTOR")
});

/// Turns one archived wiki page into a [`Document`].
///
/// `Ok(None)` means the page was rejected (meta namespace, unreadable,
/// or missing title, article container or canonical URL). `Err` is a fatal
/// structural problem and always names the source file.
pub struct DocumentExtractor {
    site: SiteConfig,
}

impl DocumentExtractor {
    pub fn new(site: SiteConfig) -> Self {
        Self { site }
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// Reads `file` from disk and extracts it. Meta pages are rejected
    /// before anything is read.
    pub fn extract_file(&self, file: &str) -> Result<Option<Document>, ExtractError> {
        if self.article_page_id(file).is_none() {
            return Ok(None);
        }

        let html = match fs::read_to_string(file) {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!("Could not read {}: {}", file, e);
                return Ok(None);
            }
        };

        self.extract_str(file, &html)
    }

    /// Extracts a page whose HTML is already in memory.
    pub fn extract_str(&self, file: &str, html: &str) -> Result<Option<Document>, ExtractError> {
        match self.article_page_id(file) {
            Some(page_id) => self.extract_page(file, page_id, html),
            None => Ok(None),
        }
    }

    /// Page id for `file`, or `None` when it names a meta page.
    fn article_page_id(&self, file: &str) -> Option<String> {
        let page_id = self.site.page_id(file);
        if self.site.is_meta_page(&page_id) {
            tracing::debug!("Skipping meta page {}", page_id);
            return None;
        }
        Some(page_id)
    }

    fn extract_page(&self, file: &str, page_id: String, html: &str) -> Result<Option<Document>, ExtractError> {
        let mut document = Html::parse_document(html);

        let Some(raw_title) = document.select(&TITLE_SELECTOR).next().map(|t| t.text().collect::<String>()) else {
            tracing::debug!("Rejecting {}: no <title>", file);
            return Ok(None);
        };
        let title = self.site.page_title(&raw_title);

        clean_document(&mut document);

        let Some(article) = document.select(&ARTICLE_SELECTOR).next() else {
            tracing::debug!("Rejecting {}: no article container", file);
            return Ok(None);
        };

        let Some(canonical_url) = document
            .select(&CANONICAL_SELECTOR)
            .next()
            .and_then(|meta| meta.value().attr("content"))
            .map(str::to_string)
        else {
            tracing::debug!("Rejecting {}: no canonical URL", file);
            return Ok(None);
        };

        let paragraphs = self
            .walk_article(article, &title)
            .map_err(|e| ExtractError::Document {
                file: file.to_string(),
                source: Box::new(e),
            })?;

        let categories = self.categories(&document);

        let facts = document
            .select(&INFOBOX_SELECTOR)
            .flat_map(|aside| infobox::parse_infobox(aside, &self.site))
            .collect::<Vec<_>>();

        tracing::debug!(
            "Extracted {}: {} paragraphs, {} categories, {} facts",
            page_id, paragraphs.len(), categories.len(), facts.len()
        );

        Ok(Some(Document {
            source: Source {
                page_id,
                canonical_url,
                file: file.to_string(),
                title,
            },
            paragraphs,
            categories,
            facts,
        }))
    }

    fn walk_article(&self, article: ElementRef, title: &str) -> Result<Vec<Paragraph>, ExtractError> {
        let text_root = article.select(&TEXT_CONTAINER_SELECTOR).next().unwrap_or(article);

        let mut tracker = SectionTracker::new(title);
        let mut walker = BodyWalker::new(&self.site);
        walker.walk(text_root, &mut tracker)?;

        for listing in article.select(&LISTING_SELECTOR) {
            walker.walk_listing(listing, &mut tracker)?;
        }

        Ok(walker.into_paragraphs())
    }

    fn categories(&self, document: &Html) -> Vec<Link> {
        document
            .select(&CATEGORY_LINK_SELECTOR)
            .filter_map(|anchor| links::classify(anchor, &self.site))
            .collect()
    }
}

/// Unwraps stylistic inline tags and drops noise subtrees, in place.
fn clean_document(document: &mut Html) {
    let unwrap_ids: Vec<_> = document.select(&UNWRAP_SELECTOR).map(|el| el.id()).collect();
    for id in unwrap_ids {
        let children: Vec<_> = match document.tree.get(id) {
            Some(node) => node.children().map(|child| child.id()).collect(),
            None => continue,
        };
        for child in children {
            if let Some(mut child_node) = document.tree.get_mut(child) {
                child_node.detach();
            }
            if let Some(mut node) = document.tree.get_mut(id) {
                node.insert_id_before(child);
            }
        }
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    let remove_ids: Vec<_> = document.select(&REMOVE_SELECTOR).map(|el| el.id()).collect();
    for id in remove_ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(title: &str, content: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
            <html><head>
              <title>{} | Avatar Wiki | FANDOM powered by Wikia</title>
              <meta property="og:url" content="http://avatar.wikia.com/wiki/Test_Page">
            </head><body>
              <div id="WikiaArticle"><div id="mw-content-text">{}</div></div>
              <div id="articleCategories"><ul class="categories">
                <li><a href="/wiki/Category:Characters">Characters</a></li>
                <li><a href="/wiki/Category:Air_Nomads?oldid=1">Air Nomads</a></li>
              </ul></div>
            </body></html>"#,
            title, content
        )
    }

    fn extractor() -> DocumentExtractor {
        DocumentExtractor::new(SiteConfig::default())
    }

    #[test]
    fn test_end_to_end_single_paragraph() {
        let html = page("Test Page", r#"<h2>History</h2><p><a href="Water.html">Water</a> is life.</p>"#);
        let doc = extractor()
            .extract_str("avatar.wikia.com/wiki/Test_Page.html", &html)
            .unwrap()
            .expect("document should be produced");

        assert_eq!(doc.page_id(), "Test_Page");
        assert_eq!(doc.source.title, "Test Page");
        assert_eq!(doc.source.canonical_url, "http://avatar.wikia.com/wiki/Test_Page");
        assert_eq!(doc.source.file, "avatar.wikia.com/wiki/Test_Page.html");

        assert_eq!(doc.paragraphs.len(), 1);
        let paragraph = &doc.paragraphs[0];
        assert_eq!(paragraph.section_path, vec!["Test Page", "History"]);
        assert_eq!(paragraph.text, "Water is life.");
        assert_eq!(
            paragraph.links,
            vec![Link {
                target_page: "Water".to_string(),
                href: "/wiki/Water".to_string(),
                external: false,
                body: "Water".to_string(),
            }]
        );

        assert_eq!(doc.categories.len(), 1);
        assert_eq!(doc.categories[0].target_page, "Category:Characters");
    }

    #[test]
    fn test_every_paragraph_starts_at_page_title() {
        let html = page(
            "Aang",
            r#"<p>Lead.</p><h1>Odd</h1><p>a</p><h3>Deep</h3><ul><li>b</li></ul><h2>Back</h2><p>c</p>"#,
        );
        let doc = extractor().extract_str("Aang.html", &html).unwrap().unwrap();

        assert_eq!(doc.paragraphs.len(), 4);
        for paragraph in &doc.paragraphs {
            assert!(!paragraph.section_path.is_empty());
            assert_eq!(paragraph.section_path[0], "Aang");
        }
    }

    #[test]
    fn test_cleanup_unwraps_style_and_drops_noise() {
        let html = page(
            "Zuko",
            r##"<p><i>Prince</i> <b><a href="Zuko.html">Zuko</a></b> of the <em>Fire Nation</em><sup class="reference"><a href="#cite_note-1">[1]</a></sup>.</p>
               <b>Bold stray</b>
               <center><p>Centered.</p></center>
               <section id="WikiaArticleComments"><p>Great page!</p></section>"##,
        );
        let doc = extractor().extract_str("Zuko.html", &html).unwrap().unwrap();

        assert_eq!(doc.paragraphs.len(), 2);
        assert_eq!(doc.paragraphs[0].text, "Prince Zuko of the Fire Nation.");
        assert_eq!(doc.paragraphs[0].body, "Prince ${link_0} of the Fire Nation.");
        assert_eq!(doc.paragraphs[1].text, "Centered.");
    }

    #[test]
    fn test_unwrapped_parent_no_longer_hides_link_context() {
        let html = page(
            "Sokka",
            r#"<p>Friend of <span class="reference-text"><i><a href="Suki">Suki</a></i></span> and <i><a href="Toph">Toph</a></i></p>"#,
        );
        let doc = extractor().extract_str("Sokka.html", &html).unwrap().unwrap();

        let targets: Vec<&str> = doc.paragraphs[0].links.iter().map(|l| l.target_page.as_str()).collect();
        assert_eq!(targets, vec!["Toph"]);
    }

    #[test]
    fn test_meta_namespace_is_rejected() {
        let html = page("Forum", "<p>hello</p>");
        assert!(extractor()
            .extract_str("avatar.wikia.com/wiki/Forum_Avatar_chat.html", &html)
            .unwrap()
            .is_none());
        assert!(extractor()
            .extract_file("avatar.wikia.com/wiki/Template:Infobox.html")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_missing_markers_are_soft_rejections() {
        let no_title = r#"<html><body><div id="WikiaArticle"><p>x</p></div></body></html>"#;
        assert!(extractor().extract_str("A.html", no_title).unwrap().is_none());

        let no_article = r#"<html><head><title>A</title><meta property="og:url" content="u"></head><body><p>x</p></body></html>"#;
        assert!(extractor().extract_str("A.html", no_article).unwrap().is_none());

        let no_canonical = r#"<html><head><title>A</title></head><body><div id="WikiaArticle"><p>x</p></div></body></html>"#;
        assert!(extractor().extract_str("A.html", no_canonical).unwrap().is_none());
    }

    #[test]
    fn test_unreadable_file_is_soft_rejection() {
        let result = extractor().extract_file("/nonexistent/avatar.wikia.com/wiki/Nowhere.html");
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_unknown_node_error_names_file() {
        let html = page("Appa", "<p>fine</p><pre>not expected</pre>");
        let err = extractor().extract_str("avatar.wikia.com/wiki/Appa.html", &html).unwrap_err();

        match &err {
            ExtractError::Document { file, .. } => assert_eq!(file, "avatar.wikia.com/wiki/Appa.html"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.offending_tag(), Some("pre"));
    }

    #[test]
    fn test_infobox_and_listing_are_collected() {
        let html = page(
            "Category:Bison",
            r#"<aside class="portable-infobox">
                 <div class="pi-item pi-data"><h3 class="pi-data-label">Species</h3>
                   <div class="pi-data-value"><a href="https://avatar.wikia.com/wiki/Sky_bison">Sky bison</a> (flying)</div></div>
               </aside>
               <p>Intro.</p>
               <div class="category-page__members">
                 <ul class="category-page__alphabet-shortcuts"><li>A</li><li>B</li></ul>
                 <div class="category-page__first-char">A</div>
                 <ul><li><a href="Appa">Appa</a></li></ul>
               </div>"#,
        );
        let doc = extractor().extract_str("Category:Bison.html", &html).unwrap().unwrap();

        assert_eq!(doc.facts.len(), 1);
        assert_eq!(doc.facts[0].key, "Species");
        assert_eq!(doc.facts[0].values[0].value_text, "Sky bison");
        assert_eq!(doc.facts[0].values[0].extra, "(flying)");
        assert!(!doc.facts[0].values[0].links[0].external);

        assert_eq!(doc.paragraphs.len(), 2);
        assert_eq!(doc.paragraphs[0].section_path, vec!["Category:Bison"]);
        assert_eq!(doc.paragraphs[1].section_path, vec!["Category:Bison", "A"]);
        assert_eq!(doc.paragraphs[1].text, "Appa");
    }
}
