// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! HTML page assembly for parsed Doxygen compounds.
//!
//! This module takes a [`Compound`], converts its detailed description
//! through [`crate::markup`], builds the member-function lists, and
//! splices everything into an HTML page template.
//!
//! # Page Layout
//!
//! The assembled contents are:
//! - an `<h3>Description</h3>` heading and a `<div class="description">`
//!   holding the converted markup
//! - `<h3>Member Functions</h3>` with a `<ul>` of public member functions,
//!   present only when the compound has any
//! - `<h3>Static Member Functions</h3>` with a `<ul class="static">`,
//!   present only when the compound has static members
//! - an optional generation timestamp footer
//!
//! # Template Contract
//!
//! The template must contain a literal `<head>` tag (the page `<title>` is
//! inserted right after it) and the literal marker `<div class="contents">`
//! (the assembled contents are inserted right after it). The built-in
//! [`DEFAULT_TEMPLATE`] satisfies both.
//!
//! # Example
//!
//! ```
//! use dox2html::parser::{Compound, MemberFunction, XmlNode};
//! use dox2html::renderer::{DEFAULT_TEMPLATE, RenderOptions, render_page};
//!
//! let compound = Compound {
//!     name: "gfx::Texture".into(),
//!     description: XmlNode::default(),
//!     functions: vec![MemberFunction {
//!         definition: "void gfx::Texture::bind".into(),
//!         args: "() const".into(),
//!         is_static: false,
//!     }],
//! };
//!
//! let opts = RenderOptions::default();
//! let page = render_page(&compound, DEFAULT_TEMPLATE, &opts).unwrap();
//!
//! assert!(page.contains("<title>gfx::Texture</title>"));
//! assert!(page.contains("void gfx::Texture::bind"));
//! ```

use crate::markup::{self, Element};
use crate::parser::{Compound, MemberFunction};
use snafu::prelude::*;

/// The HTML page template used when the caller supplies none.
pub const DEFAULT_TEMPLATE: &str = include_str!("template.html");

/// Error type for page assembly failures.
#[derive(Debug, Snafu)]
pub enum RenderError {
    /// The template has no `<head>` tag to receive the title.
    #[snafu(display("template has no <head> element"))]
    MissingHead,

    /// The template has no contents marker to receive the page body.
    #[snafu(display(r#"template has no <div class="contents"> insertion point"#))]
    MissingContents,
}

/// Configuration options for page assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Project name prefixed to the page title as `"Project: Name"`.
    ///
    /// Left empty, the title is the bare compound name.
    pub project: String,

    /// Whether to append a generation timestamp to the page contents.
    pub show_timestamp: bool,
}

/// Assembles a complete HTML page for a parsed compound.
///
/// This is the main entry point for rendering. The compound's description
/// is converted to HTML markup, the member-function lists are built, and
/// the results are spliced into `template` along with the page title.
///
/// # Arguments
///
/// * `compound` - The parsed compound to document
/// * `template` - The HTML page template; see the module documentation for
///   the required insertion points
/// * `opts` - Configuration options controlling the output
///
/// # Errors
///
/// Returns an error if the template lacks one of its insertion points.
pub fn render_page(
    compound: &Compound,
    template: &str,
    opts: &RenderOptions,
) -> Result<String, RenderError> {
    let title = if opts.project.is_empty() {
        compound.name.clone()
    } else {
        format!("{}: {}", opts.project, compound.name)
    };
    let mut title_tag = Element::new("title");
    title_tag.push_text(&title);

    let contents = render_contents(compound, opts);

    let page = insert_after(template, "<head>", &title_tag.to_html()).context(MissingHeadSnafu)?;
    insert_after(&page, r#"<div class="contents">"#, &contents).context(MissingContentsSnafu)
}

/// Builds the serialized contents fragment for a compound.
fn render_contents(compound: &Compound, opts: &RenderOptions) -> String {
    let mut out = String::new();

    out.push_str(&heading("Description").to_html());

    let mut description = Element::with_class("div", "description");
    markup::convert(&compound.description, &mut description);
    out.push_str(&description.to_html());

    let (static_functions, functions): (Vec<_>, Vec<_>) = compound
        .functions
        .iter()
        .partition(|function| function.is_static);

    if !functions.is_empty() {
        out.push_str(&heading("Member Functions").to_html());
        out.push_str(&function_list(&functions, None).to_html());
    }

    if !static_functions.is_empty() {
        out.push_str(&heading("Static Member Functions").to_html());
        out.push_str(&function_list(&static_functions, Some("static")).to_html());
    }

    if opts.show_timestamp {
        let mut stamp = Element::with_class("p", "timestamp");
        stamp.push_text(&format!(
            "Generated on {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M")
        ));
        out.push_str(&stamp.to_html());
    }

    out
}

fn heading(text: &str) -> Element {
    let mut h3 = Element::new("h3");
    h3.push_text(text);
    h3
}

/// Builds a `<ul>` with one item per function: the definition in `<em>`
/// followed by the raw argument string.
fn function_list(functions: &[&MemberFunction], class: Option<&str>) -> Element {
    let mut list = match class {
        Some(class) => Element::with_class("ul", class),
        None => Element::new("ul"),
    };

    for function in functions {
        let mut item = Element::new("li");
        let mut definition = Element::new("em");
        definition.push_text(&function.definition);
        item.push_element(definition);
        item.push_text(&function.args);
        list.push_element(item);
    }

    list
}

/// Inserts `content` immediately after the first occurrence of `marker`,
/// or returns `None` when the marker is absent.
fn insert_after(page: &str, marker: &str, content: &str) -> Option<String> {
    let position = page.find(marker)? + marker.len();
    let mut out = String::with_capacity(page.len() + content.len());
    out.push_str(&page[..position]);
    out.push_str(content);
    out.push_str(&page[position..]);
    Some(out)
}
