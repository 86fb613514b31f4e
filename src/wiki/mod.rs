// src/wiki/mod.rs
pub mod models;
pub mod site;

pub use models::{Document, Fact, FactValue, Link, Paragraph, Source};
pub use site::SiteConfig;
