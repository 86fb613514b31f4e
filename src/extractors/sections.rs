// src/extractors/sections.rs

/// Heading hierarchy active at the current point of a document walk.
///
/// The stack always holds the page title at depth 1. A heading at level `L`
/// closes every open section at depth `L` or deeper before it is pushed;
/// the root is never closed, so an in-body `h1` nests under the title.
#[derive(Debug, Clone)]
pub struct SectionTracker {
    stack: Vec<String>,
}

impl SectionTracker {
    pub fn new(page_title: &str) -> Self {
        Self { stack: vec![page_title.to_string()] }
    }

    pub fn enter_heading(&mut self, level: usize, title: &str) {
        while self.stack.len() >= level && self.stack.len() > 1 {
            self.stack.pop();
        }
        self.stack.push(title.to_string());
    }

    /// Starts a flat member-listing section: back to the root, with an empty
    /// second-level label until the listing provides one.
    pub fn enter_listing(&mut self) {
        self.stack.truncate(1);
        self.stack.push(String::new());
    }

    /// Replaces the label of the innermost section.
    pub fn set_label(&mut self, label: &str) {
        if self.stack.len() > 1 {
            if let Some(last) = self.stack.last_mut() {
                *last = label.to_string();
            }
        } else {
            self.stack.push(label.to_string());
        }
    }

    pub fn current_path(&self) -> Vec<String> {
        self.stack.clone()
    }
}
