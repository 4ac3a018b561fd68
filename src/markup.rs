// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Doxygen markup to HTML conversion.
//!
//! This module rewrites the documentation markup tree produced by
//! [`crate::parser`] into an HTML element tree. Tag names go through a
//! fixed translation table (`para` becomes `p`, `emphasis` becomes `em`,
//! and so on); unrecognized tags pass through unchanged. The text/tail
//! model of the source tree is preserved: an element's text lands inside
//! the element it produced, while its tail lands in the parent, right
//! after that element.
//!
//! Every text and tail segment is trimmed independently. Whitespace
//! between segments is not preserved, so visual spacing in the output
//! comes from structural tags such as `<p>` and `<br>`.
//!
//! # Example
//!
//! ```
//! use dox2html::markup::{Element, convert};
//! use dox2html::parser::parse_document;
//!
//! let doc = parse_document("<para>Hello <emphasis>world</emphasis>!</para>").unwrap();
//!
//! let mut target = Element::new("div");
//! convert(&doc, &mut target);
//!
//! assert_eq!(target.to_html(), "<div><p>Hello<em>world</em>!</p></div>");
//! ```

use crate::parser::XmlNode;

/// A node in the generated HTML tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A nested element.
    Element(Element),
    /// A plain text fragment, escaped at serialization time.
    Text(String),
}

/// An HTML element with a tag name, attributes, and ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name, e.g. `p` or `em`.
    pub tag: String,

    /// Attributes in insertion order.
    pub attrs: Vec<(String, String)>,

    /// Child nodes in document order.
    pub children: Vec<Node>,
}

impl Element {
    /// Creates an empty element with the given tag name.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates an empty element carrying a `class` attribute.
    #[must_use]
    pub fn with_class(tag: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: vec![("class".to_owned(), class.into())],
            children: Vec::new(),
        }
    }

    /// Appends a child element.
    pub fn push_element(&mut self, element: Element) {
        self.children.push(Node::Element(element));
    }

    /// Appends a text fragment. Empty fragments are dropped since they
    /// have no visible effect.
    pub fn push_text(&mut self, text: &str) {
        if !text.is_empty() {
            self.children.push(Node::Text(text.to_owned()));
        }
    }

    /// Concatenates every text fragment in document order, ignoring tag
    /// boundaries.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Element(element) => element.collect_text(out),
                Node::Text(text) => out.push_str(text),
            }
        }
    }

    /// Serializes this element and its subtree to HTML.
    ///
    /// Text is entity-escaped, attribute values additionally escape double
    /// quotes, and void elements such as `<br>` are written self-closing.
    /// The output is compact; no indentation is added.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }

        if self.children.is_empty() && is_void(&self.tag) {
            out.push_str(" />");
            return;
        }
        out.push('>');

        for child in &self.children {
            match child {
                Node::Element(element) => element.write_html(out),
                Node::Text(text) => out.push_str(&escape_text(text)),
            }
        }

        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

/// Returns `true` for elements that HTML forbids from having an end tag.
fn is_void(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Escapes text content for HTML.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes an attribute value for HTML. Like [`escape_text`] but double
/// quotes must also be escaped inside quoted values.
fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Translates a Doxygen markup tag into its HTML equivalent.
///
/// Unrecognized tags pass through verbatim rather than failing, matching
/// the observed behavior of the documentation toolchain.
#[must_use]
pub fn map_tag(tag: &str) -> &str {
    match tag {
        "para" => "p",
        "linebreak" => "br",
        "emphasis" => "em",
        "ref" => "a",
        "computeroutput" => "code",
        other => other,
    }
}

/// Trimming policy applied to every text and tail segment independently.
///
/// Only leading and trailing whitespace is removed; interior whitespace is
/// untouched.
#[must_use]
pub fn trim_segment(text: &str) -> &str {
    text.trim()
}

/// Recursively converts a documentation markup node into HTML under
/// `parent`.
///
/// When `source` carries a tag, a translated element is created and
/// appended to `parent`; the node's text and children land inside it. A
/// tagless node contributes its text and children directly to `parent`,
/// which allows seeding the traversal at a wrapper element that should not
/// itself appear in the output. Tail text always lands in `parent`,
/// immediately after the subtree it follows, so output document order
/// matches input document order exactly.
///
/// Source attributes are not carried over. The call only ever appends to
/// `parent`; converting the same node twice appends duplicate content.
pub fn convert(source: &XmlNode, parent: &mut Element) {
    match source.tag.as_deref() {
        Some(tag) => {
            let mut current = Element::new(map_tag(tag));
            if let Some(text) = &source.text {
                current.push_text(trim_segment(text));
            }
            for child in &source.children {
                convert(child, &mut current);
            }
            parent.push_element(current);
        }
        None => {
            if let Some(text) = &source.text {
                parent.push_text(trim_segment(text));
            }
            for child in &source.children {
                convert(child, parent);
            }
        }
    }

    if let Some(tail) = &source.tail {
        parent.push_text(trim_segment(tail));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(tag: &str) -> XmlNode {
        XmlNode {
            tag: Some(tag.to_owned()),
            ..XmlNode::default()
        }
    }

    fn text_node(tag: &str, text: &str) -> XmlNode {
        XmlNode {
            tag: Some(tag.to_owned()),
            text: Some(text.to_owned()),
            ..XmlNode::default()
        }
    }

    /// Concatenates the trimmed text and tail segments of a source tree in
    /// document order, mirroring what conversion must preserve.
    fn source_text(source: &XmlNode, out: &mut String) {
        if let Some(text) = &source.text {
            out.push_str(text.trim());
        }
        for child in &source.children {
            source_text(child, out);
        }
        if let Some(tail) = &source.tail {
            out.push_str(tail.trim());
        }
    }

    fn convert_into_div(source: &XmlNode) -> Element {
        let mut target = Element::new("div");
        convert(source, &mut target);
        target
    }

    #[test]
    fn maps_each_known_tag() {
        let mappings = [
            ("para", "p"),
            ("linebreak", "br"),
            ("emphasis", "em"),
            ("ref", "a"),
            ("computeroutput", "code"),
        ];

        for (source_tag, html_tag) in mappings {
            let target = convert_into_div(&node(source_tag));

            assert_eq!(target.children.len(), 1, "converting <{source_tag}>");
            match &target.children[0] {
                Node::Element(element) => assert_eq!(element.tag, html_tag),
                other => panic!("Expected Element, got {other:?}"),
            }
        }
    }

    #[test]
    fn passes_unknown_tags_through() {
        let target = convert_into_div(&node("itemizedlist"));

        match &target.children[0] {
            Node::Element(element) => assert_eq!(element.tag, "itemizedlist"),
            other => panic!("Expected Element, got {other:?}"),
        }
    }

    #[test]
    fn converts_paragraph_with_emphasis_and_tail() {
        // <para>Hello <emphasis>world</emphasis>!</para>
        let source = XmlNode {
            tag: Some("para".to_owned()),
            text: Some("Hello ".to_owned()),
            children: vec![XmlNode {
                tag: Some("emphasis".to_owned()),
                text: Some("world".to_owned()),
                tail: Some("!".to_owned()),
                ..XmlNode::default()
            }],
            ..XmlNode::default()
        };

        let target = convert_into_div(&source);
        assert_eq!(target.to_html(), "<div><p>Hello<em>world</em>!</p></div>");
    }

    #[test]
    fn converts_ref_to_anchor() {
        let target = convert_into_div(&text_node("ref", "SomeClass"));
        assert_eq!(target.to_html(), "<div><a>SomeClass</a></div>");
    }

    #[test]
    fn drops_source_attributes() {
        let source = XmlNode {
            tag: Some("ref".to_owned()),
            attrs: vec![("refid".to_owned(), "classtest".to_owned())],
            text: Some("Widget".to_owned()),
            ..XmlNode::default()
        };

        let target = convert_into_div(&source);
        assert_eq!(target.to_html(), "<div><a>Widget</a></div>");
    }

    #[test]
    fn preserves_sibling_order_with_tails() {
        let mut first = text_node("emphasis", "A");
        first.tail = Some(" tail-a ".to_owned());
        let mut second = text_node("computeroutput", "B");
        second.tail = Some(" tail-b ".to_owned());
        let mut third = text_node("ref", "C");
        third.tail = Some(" tail-c ".to_owned());

        let source = XmlNode {
            tag: Some("para".to_owned()),
            text: Some("lead ".to_owned()),
            children: vec![first, second, third],
            ..XmlNode::default()
        };

        let target = convert_into_div(&source);
        assert_eq!(
            target.to_html(),
            "<div><p>lead<em>A</em>tail-a<code>B</code>tail-b<a>C</a>tail-c</p></div>"
        );
    }

    #[test]
    fn rootless_node_attaches_directly_to_parent() {
        let source = XmlNode {
            tag: None,
            text: Some("intro ".to_owned()),
            children: vec![text_node("para", "body")],
            ..XmlNode::default()
        };

        let target = convert_into_div(&source);

        // No wrapping element: the text and the paragraph are direct
        // children of the div.
        assert_eq!(target.to_html(), "<div>intro<p>body</p></div>");
    }

    #[test]
    fn whitespace_only_segments_contribute_nothing() {
        let mut child = text_node("emphasis", "kept");
        child.tail = Some("\n    ".to_owned());

        let source = XmlNode {
            tag: Some("para".to_owned()),
            text: Some("   ".to_owned()),
            children: vec![child],
            ..XmlNode::default()
        };

        let target = convert_into_div(&source);
        assert_eq!(target.to_html(), "<div><p><em>kept</em></p></div>");
    }

    #[test]
    fn preserves_text_across_nested_markup() {
        let mut code = text_node("computeroutput", "Surface");
        code.tail = Some(" objects. ".to_owned());
        let mut inner_em = text_node("emphasis", "deep");
        inner_em.tail = Some(" nesting".to_owned());
        let mut outer = text_node("para", "Loads ");
        outer.children.push(code);
        outer.children.push(XmlNode {
            tag: Some("emphasis".to_owned()),
            text: Some("with ".to_owned()),
            children: vec![inner_em],
            ..XmlNode::default()
        });

        let mut expected = String::new();
        source_text(&outer, &mut expected);

        let target = convert_into_div(&outer);
        assert_eq!(target.text_content(), expected);
    }

    #[test]
    fn linebreak_serializes_self_closing() {
        let mut source = text_node("para", "first");
        let mut br = node("linebreak");
        br.tail = Some("second".to_owned());
        source.children.push(br);

        let target = convert_into_div(&source);
        assert_eq!(target.to_html(), "<div><p>first<br />second</p></div>");
    }

    #[test]
    fn empty_non_void_element_keeps_end_tag() {
        let target = convert_into_div(&node("para"));
        assert_eq!(target.to_html(), "<div><p></p></div>");
    }

    #[test]
    fn escapes_text_on_serialization() {
        let target = convert_into_div(&text_node("computeroutput", "a < b && c > d"));
        assert_eq!(
            target.to_html(),
            "<div><code>a &lt; b &amp;&amp; c &gt; d</code></div>"
        );
    }

    #[test]
    fn escapes_attribute_values() {
        let mut element = Element::with_class("div", r#"a"b<c"#);
        element.push_text("x");
        assert_eq!(element.to_html(), r#"<div class="a&quot;b&lt;c">x</div>"#);
    }

    #[test]
    fn trim_segment_trims_ends_only() {
        assert_eq!(trim_segment("  a  b  "), "a  b");
        assert_eq!(trim_segment("\n\t"), "");
        assert_eq!(trim_segment("plain"), "plain");
    }

    #[test]
    fn push_text_drops_empty_fragments() {
        let mut element = Element::new("p");
        element.push_text("");
        assert!(element.children.is_empty());
    }

    #[test]
    fn converting_twice_appends_duplicate_content() {
        let source = text_node("para", "once");
        let mut target = Element::new("div");
        convert(&source, &mut target);
        convert(&source, &mut target);

        assert_eq!(target.to_html(), "<div><p>once</p><p>once</p></div>");
    }
}
