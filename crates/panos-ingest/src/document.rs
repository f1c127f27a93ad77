//! Parsed document tree abstraction.
//!
//! Extraction only needs three capabilities from a parsed page: iterate a
//! node's children, read an element's tag name, and read a text node's
//! content. [`DocNode`] captures exactly that so the extractors do not
//! depend on the HTML parsing library; [`HtmlNode`] is the owned tree built
//! from `scraper`.

use scraper::{ElementRef, Html, Node};

pub trait DocNode: Sized {
    /// Lowercase element name, `None` for text nodes.
    fn tag_name(&self) -> Option<&str>;

    /// Content of a text node, `None` for elements.
    fn text_content(&self) -> Option<&str>;

    fn children(&self) -> impl Iterator<Item = &Self>;

    fn is_tag(&self, tag: &str) -> bool {
        self.tag_name() == Some(tag)
    }

    /// Concatenation of every descendant text node.
    fn text(&self) -> String {
        let mut out = String::new();
        visit_text(self, &mut |text| out.push_str(text));
        out
    }

    /// Every descendant text node trimmed, concatenated without separator.
    fn stripped_text(&self) -> String {
        let mut out = String::new();
        visit_text(self, &mut |text| out.push_str(text.trim()));
        out
    }

    /// Descendant elements whose tag is in `tags`, in document order.
    fn find_all(&self, tags: &[&str]) -> Vec<&Self> {
        let mut found = Vec::new();
        for child in self.children() {
            collect_tags(child, tags, &mut found);
        }
        found
    }
}

fn visit_text<N: DocNode>(node: &N, visit: &mut impl FnMut(&str)) {
    if let Some(text) = node.text_content() {
        visit(text);
        return;
    }
    for child in node.children() {
        visit_text(child, visit);
    }
}

fn collect_tags<'a, N: DocNode>(node: &'a N, tags: &[&str], found: &mut Vec<&'a N>) {
    if node.tag_name().is_some_and(|tag| tags.contains(&tag)) {
        found.push(node);
    }
    for child in node.children() {
        collect_tags(child, tags, found);
    }
}

/// Owned element/text tree. Comments, doctypes and processing instructions
/// are dropped during conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    Element { tag: String, children: Vec<HtmlNode> },
    Text(String),
}

impl HtmlNode {
    /// Parse a full HTML document; the returned node is the `<html>` element.
    pub fn parse_document(html: &str) -> Self {
        let document = Html::parse_document(html);
        from_element(document.root_element())
    }

    /// Parse an HTML fragment; the returned node is the fragment root.
    pub fn parse_fragment(html: &str) -> Self {
        let fragment = Html::parse_fragment(html);
        from_element(fragment.root_element())
    }

    pub fn element(tag: impl Into<String>, children: Vec<HtmlNode>) -> Self {
        Self::Element {
            tag: tag.into().to_ascii_lowercase(),
            children,
        }
    }

    pub fn text_node(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

fn from_element(element: ElementRef<'_>) -> HtmlNode {
    let mut children = Vec::new();
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let content: &str = text;
                children.push(HtmlNode::Text(content.to_string()));
            }
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    children.push(from_element(child_element));
                }
            }
            _ => {}
        }
    }
    HtmlNode::element(element.value().name(), children)
}

impl DocNode for HtmlNode {
    fn tag_name(&self) -> Option<&str> {
        match self {
            Self::Element { tag, .. } => Some(tag),
            Self::Text(_) => None,
        }
    }

    fn text_content(&self) -> Option<&str> {
        match self {
            Self::Element { .. } => None,
            Self::Text(text) => Some(text),
        }
    }

    fn children(&self) -> impl Iterator<Item = &Self> {
        match self {
            Self::Element { children, .. } => children.iter(),
            Self::Text(_) => std::slice::Iter::default(),
        }
    }
}
