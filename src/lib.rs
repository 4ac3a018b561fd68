// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Convert Doxygen XML class descriptions to HTML documentation pages.
//!
//! This crate provides parsing, markup conversion, and page assembly for
//! transforming the XML files Doxygen writes for documented compounds
//! (classes, structs, namespaces) into styled HTML pages.
//!
//! # Overview
//!
//! Doxygen describes each documented compound as one XML file. This crate:
//!
//! 1. Parses the XML into an element tree and extracts the compound name,
//!    member-function signatures, and detailed description
//! 2. Converts the description markup (paragraphs, emphasis, code spans,
//!    line breaks, cross-references) into an HTML fragment
//! 3. Splices the title and fragment into an HTML page template
//!
//! # Example
//!
//! ```no_run
//! use dox2html::{parser, renderer};
//!
//! let xml = std::fs::read_to_string("xml/classcinder_1_1_camera.xml").unwrap();
//! let compound = parser::parse_compound(&xml).unwrap();
//!
//! let opts = renderer::RenderOptions {
//!     project: "Cinder".into(),
//!     ..Default::default()
//! };
//!
//! let page = renderer::render_page(&compound, renderer::DEFAULT_TEMPLATE, &opts).unwrap();
//! println!("{page}");
//! ```
//!
//! # Modules
//!
//! - [`parser`]: XML parsing and compound extraction
//! - [`markup`]: documentation markup to HTML tree conversion
//! - [`renderer`]: HTML page assembly from a template

#![deny(missing_docs)]

pub mod markup;
pub mod parser;
pub mod renderer;
