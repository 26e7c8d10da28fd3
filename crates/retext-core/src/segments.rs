use crate::dom::DomNode;
use crate::normalize::normalize;

pub const EXCLUDED_TAGS: &[&str] = &[
    "script", "style", "noscript", "head", "title", "meta", "link", "template",
];

// `element` does not keep its document alive; the parsed tree must outlive
// the segments for XPath generation to work.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSegment<N> {
    pub element: N,
    pub raw_text: String,
    pub normalized_text: String,
    pub word_count: usize,
}

impl<N> TextSegment<N> {
    fn new(element: N, raw_text: String, normalized_text: String) -> Self {
        let word_count = normalized_text.split_whitespace().count();
        Self {
            element,
            raw_text,
            normalized_text,
            word_count,
        }
    }
}

pub fn is_excluded_tag(tag: &str) -> bool {
    EXCLUDED_TAGS.contains(&tag)
}

pub fn extract_segments<N: DomNode>(root: &N) -> Segments<N> {
    Segments {
        stack: vec![root.clone()],
    }
}

pub struct Segments<N> {
    stack: Vec<N>,
}

impl<N: DomNode> Iterator for Segments<N> {
    type Item = TextSegment<N>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            let mut children: Vec<N> = node.children().collect();
            children.reverse();
            self.stack.extend(children);

            let Some(raw_text) = node.text() else {
                continue;
            };
            let Some(parent) = node.parent() else {
                continue;
            };
            let Some(tag) = parent.tag_name() else {
                continue;
            };
            if is_excluded_tag(&tag) {
                continue;
            }
            let normalized = normalize(&raw_text);
            if normalized.is_empty() {
                continue;
            }
            return Some(TextSegment::new(parent, raw_text, normalized));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{content_root, parse_document};

    fn texts(html: &str) -> Vec<String> {
        let doc = parse_document(html).unwrap();
        let root = content_root(&doc).unwrap();
        extract_segments(&root)
            .map(|segment| segment.normalized_text)
            .collect()
    }

    #[test]
    fn preserves_document_order() {
        let html = "<div><h1>Title</h1><p>First <b>bold</b> tail</p></div><p>Last</p>";
        assert_eq!(texts(html), ["Title", "First", "bold", "tail", "Last"]);
    }

    #[test]
    fn skips_non_content_tags() {
        let html = r#"
            <body>
              <script>var x = 1;</script>
              <style>p { color: red }</style>
              <noscript>Enable JS</noscript>
              <p>Visible</p>
            </body>"#;
        assert_eq!(texts(html), ["Visible"]);
    }

    #[test]
    fn skips_whitespace_only_nodes() {
        let html = "<ul>\n  <li>One</li>\n  <li> &nbsp; </li>\n  <li>Two</li>\n</ul>";
        assert_eq!(texts(html), ["One", "Two"]);
    }

    #[test]
    fn keeps_raw_text_and_counts_words() {
        let doc = parse_document("<p>  Hello\n   world  </p>").unwrap();
        let root = content_root(&doc).unwrap();
        let segments: Vec<_> = extract_segments(&root).collect();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].raw_text, "  Hello\n   world  ");
        assert_eq!(segments[0].normalized_text, "Hello world");
        assert_eq!(segments[0].word_count, 2);
        assert_eq!(segments[0].element.tag_name().as_deref(), Some("p"));
    }

    #[test]
    fn extraction_is_restartable() {
        let html = "<section><p>a b</p><span>c</span><script>x</script><p>d</p></section>";
        let doc = parse_document(html).unwrap();
        let root = content_root(&doc).unwrap();
        let first: Vec<_> = extract_segments(&root).collect();
        let second: Vec<_> = extract_segments(&root).collect();
        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
    }

    #[test]
    fn segments_never_empty() {
        let html = "<div> <p>\t</p><p>x</p>\n<em></em> </div>";
        let doc = parse_document(html).unwrap();
        let root = content_root(&doc).unwrap();
        assert!(extract_segments(&root).all(|s| !s.normalized_text.is_empty()));
    }
}
