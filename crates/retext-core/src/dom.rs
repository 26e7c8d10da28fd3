//! Typed view over a parsed HTML tree.
//!
//! The matching algorithms only need a handful of navigation primitives, so
//! they are written against [`DomNode`] instead of a concrete parser.

use kuchiki::{iter::Siblings, traits::*, Node, NodeRef};
use tracing::debug;

use crate::error::Error;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Handles are cheap to clone and compare by identity. A node only reaches
/// its ancestors while the document that owns it is alive.
pub trait DomNode: Clone + PartialEq {
    type Children: Iterator<Item = Self>;

    /// HTML element names are lowercased; foreign (SVG, MathML) names keep
    /// their case. `None` for non-elements.
    fn tag_name(&self) -> Option<String>;
    fn children(&self) -> Self::Children;
    fn parent(&self) -> Option<Self>;
    fn text(&self) -> Option<String>;
    fn is_document(&self) -> bool;
}

impl DomNode for NodeRef {
    type Children = Siblings;

    fn tag_name(&self) -> Option<String> {
        let el = self.as_element()?;
        if &*el.name.ns == HTML_NAMESPACE {
            Some(el.name.local.to_lowercase())
        } else {
            Some(el.name.local.to_string())
        }
    }

    fn children(&self) -> Siblings {
        NodeRef::children(self)
    }

    fn parent(&self) -> Option<NodeRef> {
        // `parent` lives on `Node`; `NodeRef::parent` would resolve back here.
        Node::parent(self)
    }

    fn text(&self) -> Option<String> {
        self.as_text().map(|text| text.borrow().clone())
    }

    fn is_document(&self) -> bool {
        self.as_document().is_some()
    }
}

/// html5ever recovers from malformed markup, so only blank input fails.
pub fn parse_document(html: &str) -> Result<NodeRef, Error> {
    if html.trim().is_empty() {
        return Err(Error::Parse("document is empty".into()));
    }
    let document = kuchiki::parse_html().one(html.to_string());
    debug!(bytes = html.len(), "parsed html document");
    Ok(document)
}

pub fn content_root(document: &NodeRef) -> Result<NodeRef, Error> {
    if let Ok(body) = document.select_first("body") {
        return Ok(body.as_node().clone());
    }
    document
        .select_first("html")
        .map(|html| html.as_node().clone())
        .map_err(|_| Error::Parse("HTML body or html tag not found in the document".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_names_are_lowercase() {
        let doc = parse_document("<BODY><P>Text</P></BODY>").unwrap();
        let p = doc.select_first("p").unwrap();
        assert_eq!(p.as_node().tag_name().as_deref(), Some("p"));
    }

    #[test]
    fn text_only_on_text_nodes() {
        let doc = parse_document("<p>Hello</p>").unwrap();
        let p = doc.select_first("p").unwrap().as_node().clone();
        assert_eq!(DomNode::text(&p), None);
        let text = DomNode::children(&p).next().unwrap();
        assert_eq!(DomNode::text(&text).as_deref(), Some("Hello"));
        assert_eq!(text.tag_name(), None);
        assert!(DomNode::parent(&text).unwrap() == p);
    }

    #[test]
    fn parent_chain_reaches_document() {
        let doc = parse_document("<div><p><b>deep</b></p></div>").unwrap();
        let b = doc.select_first("b").unwrap().as_node().clone();
        let mut tags = Vec::new();
        let mut current = DomNode::parent(&b);
        while let Some(node) = current {
            if node.is_document() {
                break;
            }
            tags.push(node.tag_name().unwrap());
            current = DomNode::parent(&node);
        }
        assert_eq!(tags, ["p", "div", "body", "html"]);
    }

    #[test]
    fn foreign_element_names_keep_case() {
        let doc = parse_document(
            "<svg><foreignObject><p>inside</p></foreignObject><linearGradient/></svg>",
        )
        .unwrap();
        let svg = doc.select_first("svg").unwrap().as_node().clone();
        let names: Vec<_> = DomNode::children(&svg).filter_map(|c| c.tag_name()).collect();
        assert_eq!(names, ["foreignObject", "linearGradient"]);
        let p = doc.select_first("p").unwrap();
        assert_eq!(p.as_node().tag_name().as_deref(), Some("p"));
    }

    #[test]
    fn document_node_is_detected() {
        let doc = parse_document("<p>x</p>").unwrap();
        assert!(doc.is_document());
        let p = doc.select_first("p").unwrap();
        assert!(!p.as_node().is_document());
    }

    #[test]
    fn empty_input_is_a_parse_error() {
        assert!(matches!(parse_document("  \n"), Err(Error::Parse(_))));
    }

    #[test]
    fn malformed_markup_is_tolerated() {
        let doc = parse_document("<div><p>unclosed <b>bold</div>").unwrap();
        let root = content_root(&doc).unwrap();
        assert_eq!(root.tag_name().as_deref(), Some("body"));
        assert!(root.text_contents().contains("unclosed bold"));
    }

    #[test]
    fn content_root_is_body() {
        let doc = parse_document("<html><head><title>t</title></head><body><p>b</p></body></html>")
            .unwrap();
        let root = content_root(&doc).unwrap();
        assert_eq!(root.tag_name().as_deref(), Some("body"));
    }
}
