use common::result::base::ABSENT;
use scraper::{ElementRef, Html, node::Node};

use crate::utils::html::element_to_text;

/// Label to value lookup over one rendered characteristics page.
///
/// Built from a single page source and never reused for another page.
pub struct Characteristics {
    document: Html,
}

impl Characteristics {
    pub fn parse(source: &str) -> Self {
        Self {
            document: Html::parse_document(source),
        }
    }

    /// Finds the first text node that reads exactly `label` (surrounding
    /// whitespace aside) and returns the trimmed text of the next `div` in
    /// document order. Missing labels yield [`ABSENT`].
    pub fn lookup(&self, label: &str) -> String {
        let label = label.trim();

        // whitespace-only text nodes are everywhere in the markup
        if label.is_empty() {
            return ABSENT.into();
        }

        let mut nodes = self.document.tree.root().descendants();

        let found = nodes
            .by_ref()
            .any(|node| matches!(node.value(), Node::Text(text) if text.trim() == label));

        if !found {
            return ABSENT.into();
        }

        nodes
            .filter_map(ElementRef::wrap)
            .find(|element| element.value().name() == "div")
            .map(element_to_text)
            .unwrap_or_else(|| ABSENT.into())
    }
}
