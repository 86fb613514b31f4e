// src/extractors/mod.rs
pub mod body;
pub mod document;
pub mod infobox;
pub mod inline;
pub mod links;
pub mod sections;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use document::DocumentExtractor;
#[allow(unused_imports)]
pub use inline::{resolve, InlineText, Segment};
#[allow(unused_imports)]
pub use sections::SectionTracker;
