// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! XML parsing for Doxygen class descriptions.
//!
//! This module turns the XML file Doxygen writes for a documented compound
//! into an element tree, then extracts the pieces a documentation page
//! needs: the compound name, the public member-function signatures, and the
//! detailed-description markup subtree.
//!
//! # Format Overview
//!
//! A Doxygen compound file looks like:
//!
//! ```text
//! <doxygen>
//!   <compounddef kind="class" prot="public">
//!     <compoundname>cinder::Camera</compoundname>
//!     <sectiondef kind="public-func">
//!       <memberdef kind="function" prot="public" static="no">
//!         <definition>float cinder::Camera::getAspectRatio</definition>
//!         <argsstring>() const</argsstring>
//!       </memberdef>
//!     </sectiondef>
//!     <detaileddescription>
//!       <para>A <emphasis>camera</emphasis> in 3-D space.</para>
//!     </detaileddescription>
//!   </compounddef>
//! </doxygen>
//! ```
//!
//! # Text and Tail
//!
//! The element tree keeps the classic text/tail model: an element's `text`
//! is the character data before its first child element, and its `tail` is
//! the character data after its closing tag, which belongs to the parent's
//! text stream.
//!
//! ```text
//! <para>
//!   TEXT HERE            <- para's text
//!   <emphasis>inner</emphasis>
//!   TAIL HERE            <- emphasis's tail
//! </para>
//! ```
//!
//! # Example
//!
//! ```
//! use dox2html::parser::parse_compound;
//!
//! let xml = r#"<doxygen><compounddef kind="class">
//!     <compoundname>cinder::Camera</compoundname>
//!     <detaileddescription><para>A camera.</para></detaileddescription>
//! </compounddef></doxygen>"#;
//!
//! let compound = parse_compound(xml).unwrap();
//! assert_eq!(compound.name, "cinder::Camera");
//! assert!(compound.functions.is_empty());
//! ```

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use snafu::prelude::*;

/// Error type for XML parsing failures.
#[derive(Debug, Snafu)]
pub enum ParseError {
    /// The XML could not be read.
    #[snafu(display("failed to parse XML: {source}"))]
    Xml {
        /// The underlying XML reader error.
        source: quick_xml::Error,
    },

    /// An element carried a malformed attribute.
    #[snafu(display("failed to parse XML attribute: {source}"))]
    Attr {
        /// The underlying attribute error.
        source: quick_xml::events::attributes::AttrError,
    },

    /// The input ended while elements were still open.
    #[snafu(display("unexpected end of input: unclosed element"))]
    Truncated,

    /// The input contained no root element.
    #[snafu(display("document contains no root element"))]
    MissingRoot,

    /// The document has no `compounddef` element.
    #[snafu(display("no compounddef element found"))]
    MissingCompoundDef,

    /// The document has no usable `compoundname` element.
    #[snafu(display("no compoundname element found"))]
    MissingCompoundName,
}

/// A node in the parsed XML element tree.
///
/// Character data lives in `text` and `tail` rather than in the child list,
/// so `children` contains elements only. See the module documentation for
/// the text/tail model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    /// Element name. `None` marks a synthetic node used to seed markup
    /// conversion without a wrapping element.
    pub tag: Option<String>,

    /// Attributes in document order.
    pub attrs: Vec<(String, String)>,

    /// Character data before the first child element.
    pub text: Option<String>,

    /// Character data after this element's closing tag, belonging to the
    /// parent's text stream.
    pub tail: Option<String>,

    /// Child elements in document order.
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    /// Returns the value of the named attribute, if present.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the first direct child with the given tag name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children
            .iter()
            .find(|child| child.tag.as_deref() == Some(name))
    }

    /// Iterates over the direct children with the given tag name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> {
        self.children
            .iter()
            .filter(move |child| child.tag.as_deref() == Some(name))
    }

    /// Returns the first descendant with the given tag name, in document
    /// order. The node itself is not considered.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&XmlNode> {
        for child in &self.children {
            if child.tag.as_deref() == Some(name) {
                return Some(child);
            }
            if let Some(found) = child.find(name) {
                return Some(found);
            }
        }
        None
    }

    /// Detaches this node from its surroundings: the tag and tail are
    /// cleared so the node can seed markup conversion without producing a
    /// wrapping element of its own.
    #[must_use]
    pub fn into_rootless(mut self) -> Self {
        self.tag = None;
        self.tail = None;
        self
    }
}

/// A documented compound extracted from one Doxygen XML file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compound {
    /// Fully qualified name, e.g. `cinder::Camera`.
    pub name: String,

    /// The detailed-description subtree, detached and ready to seed markup
    /// conversion. Empty when the file has no detailed description.
    pub description: XmlNode,

    /// Public member functions in document order.
    pub functions: Vec<MemberFunction>,
}

/// One public member-function signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberFunction {
    /// Return type and qualified name, e.g. `float cinder::Camera::getAspectRatio`.
    pub definition: String,

    /// The argument list as written, e.g. `() const`.
    pub args: String,

    /// Whether the function is declared `static`.
    pub is_static: bool,
}

/// Parses an XML document into an element tree.
///
/// Returns the root element. Entity references are decoded; comments,
/// processing instructions, the XML declaration, and DOCTYPE are skipped.
///
/// # Errors
///
/// Returns an error if the XML is malformed or contains no root element.
///
/// # Example
///
/// ```
/// use dox2html::parser::parse_document;
///
/// let root = parse_document("<a>one<b>two</b>three</a>").unwrap();
/// assert_eq!(root.tag.as_deref(), Some("a"));
/// assert_eq!(root.text.as_deref(), Some("one"));
/// assert_eq!(root.children[0].tail.as_deref(), Some("three"));
/// ```
pub fn parse_document(xml: &str) -> Result<XmlNode, ParseError> {
    let mut reader = Reader::from_str(xml);

    // The bottom entry is a synthetic document node; real elements stack on
    // top of it as their start tags arrive.
    let mut stack = vec![XmlNode::default()];

    loop {
        match reader.read_event().context(XmlSnafu)? {
            Event::Start(start) => stack.push(element_from_start(&start)?),
            Event::Empty(start) => {
                let node = element_from_start(&start)?;
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(node);
                }
            }
            Event::End(_) => {
                let node = stack.pop().context(TruncatedSnafu)?;
                let parent = stack.last_mut().context(TruncatedSnafu)?;
                parent.children.push(node);
            }
            Event::Text(text) => {
                let content = text
                    .unescape()
                    .map_err(quick_xml::Error::from)
                    .context(XmlSnafu)?;
                if let Some(parent) = stack.last_mut() {
                    append_character_data(parent, &content);
                }
            }
            Event::CData(data) => {
                let content = String::from_utf8_lossy(&data).into_owned();
                if let Some(parent) = stack.last_mut() {
                    append_character_data(parent, &content);
                }
            }
            Event::Eof => break,
            // Declaration, comments, processing instructions, DOCTYPE.
            _ => {}
        }
    }

    ensure!(stack.len() == 1, TruncatedSnafu);
    let document = stack.remove(0);
    document.children.into_iter().next().context(MissingRootSnafu)
}

/// Builds an element node from a start tag, decoding its attributes.
fn element_from_start(start: &BytesStart<'_>) -> Result<XmlNode, ParseError> {
    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr.context(AttrSnafu)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(quick_xml::Error::from)
            .context(XmlSnafu)?
            .into_owned();
        attrs.push((key, value));
    }

    Ok(XmlNode {
        tag: Some(String::from_utf8_lossy(start.name().as_ref()).into_owned()),
        attrs,
        ..XmlNode::default()
    })
}

/// Attaches character data to the element currently being built.
///
/// Before the first child element the data is the element's own text;
/// afterwards it is the tail of the most recent child.
fn append_character_data(parent: &mut XmlNode, content: &str) {
    let slot = match parent.children.last_mut() {
        Some(child) => &mut child.tail,
        None => &mut parent.text,
    };
    match slot {
        Some(existing) => existing.push_str(content),
        None => *slot = Some(content.to_owned()),
    }
}

/// Parses a Doxygen XML file into a [`Compound`].
///
/// This is the main entry point for parsing. It locates the `compounddef`
/// element, reads the compound name, collects every public member function
/// under any `sectiondef`, and detaches the detailed description for
/// markup conversion.
///
/// # Errors
///
/// Returns an error if the XML is malformed, or if the document has no
/// `compounddef` or no `compoundname`.
///
/// # Example
///
/// ```
/// use dox2html::parser::parse_compound;
///
/// let xml = r#"<doxygen><compounddef kind="class">
///     <compoundname>gfx::Texture</compoundname>
///     <sectiondef kind="public-func">
///         <memberdef kind="function" prot="public" static="no">
///             <definition>void gfx::Texture::bind</definition>
///             <argsstring>() const</argsstring>
///         </memberdef>
///     </sectiondef>
/// </compounddef></doxygen>"#;
///
/// let compound = parse_compound(xml).unwrap();
/// assert_eq!(compound.name, "gfx::Texture");
/// assert_eq!(compound.functions.len(), 1);
/// assert_eq!(compound.functions[0].args, "() const");
/// ```
pub fn parse_compound(xml: &str) -> Result<Compound, ParseError> {
    let root = parse_document(xml)?;
    let compound_def = root.find("compounddef").context(MissingCompoundDefSnafu)?;

    let name = compound_def
        .find("compoundname")
        .and_then(|node| node.text.as_deref())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .context(MissingCompoundNameSnafu)?
        .to_owned();

    let functions = compound_def
        .children_named("sectiondef")
        .flat_map(|section| section.children_named("memberdef"))
        .filter(|member| {
            member.attr("kind") == Some("function") && member.attr("prot") == Some("public")
        })
        .map(|member| MemberFunction {
            definition: member
                .child("definition")
                .and_then(|node| node.text.clone())
                .unwrap_or_default(),
            args: member
                .child("argsstring")
                .and_then(|node| node.text.clone())
                .unwrap_or_default(),
            is_static: member.attr("static") == Some("yes"),
        })
        .collect();

    let description = compound_def
        .child("detaileddescription")
        .cloned()
        .unwrap_or_default()
        .into_rootless();

    Ok(Compound {
        name,
        description,
        functions,
    })
}
