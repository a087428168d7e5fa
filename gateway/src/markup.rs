//! Minimal HTML node tree.
//!
//! Panels and the page layout are built as [`Node`] trees and rendered to
//! markup once, at the edge. Text and attribute values are always escaped;
//! tags and style keys are static strings chosen by this crate.

use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub id: Option<String>,
    pub style: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            id: None,
            style: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn style(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.style.push((key, value.into()));
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Node::Element(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Text(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Text(value)
    }
}

pub fn div() -> Element {
    Element::new("div")
}

pub fn h1(text: impl Into<String>) -> Element {
    Element::new("h1").text(text)
}

pub fn h2(text: impl Into<String>) -> Element {
    Element::new("h2").text(text)
}

pub fn h3(text: impl Into<String>) -> Element {
    Element::new("h3").text(text)
}

pub fn p(text: impl Into<String>) -> Element {
    Element::new("p").text(text)
}

impl Node {
    /// Render to an HTML fragment
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&escape(text)),
            Node::Element(el) => {
                out.push('<');
                out.push_str(el.tag);
                if let Some(id) = &el.id {
                    let _ = write!(out, " id=\"{}\"", escape(id));
                }
                if !el.style.is_empty() {
                    let css: Vec<String> = el
                        .style
                        .iter()
                        .map(|(k, v)| format!("{}: {}", k, v))
                        .collect();
                    let _ = write!(out, " style=\"{}\"", escape(&css.join("; ")));
                }
                out.push('>');
                for child in &el.children {
                    child.render_into(out);
                }
                let _ = write!(out, "</{}>", el.tag);
            }
        }
    }

    /// Every `Text` node in document order
    pub fn text_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        self.collect_text(&mut lines);
        lines
    }

    fn collect_text(&self, lines: &mut Vec<String>) {
        match self {
            Node::Text(text) => lines.push(text.clone()),
            Node::Element(el) => el.children.iter().for_each(|c| c.collect_text(lines)),
        }
    }

    /// Whether any text node equals `needle`
    pub fn has_text(&self, needle: &str) -> bool {
        self.text_lines().iter().any(|l| l == needle)
    }

    /// Whether any text node starts with `prefix`
    pub fn has_text_prefix(&self, prefix: &str) -> bool {
        self.text_lines().iter().any(|l| l.starts_with(prefix))
    }
}

/// Escape for both text content and double-quoted attributes
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
