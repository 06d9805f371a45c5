//! Mini-markdown for about screens.
//!
//! This crate converts about texts written with two small constructs into
//! plain text plus style ranges that a rich-text widget can display:
//!
//! - `[text](target)` becomes `text`, annotated as a hyperlink to `target`
//! - the first line of the result is annotated as bold
//!
//! # Example
//!
//! ```rust
//! use colophon_markup::{parse, StyleRange};
//!
//! let doc = parse("Colophon 2.1\nSee [the docs](https://docs.example).");
//!
//! assert_eq!(doc.plain_text, "Colophon 2.1\nSee the docs.");
//! assert_eq!(
//!     doc.styles,
//!     vec![
//!         StyleRange::bold(0, 12),
//!         StyleRange::hyperlink(17, 8, "https://docs.example"),
//!     ]
//! );
//!
//! // A display layer maps a click to an offset, then asks for the link.
//! assert_eq!(doc.link_at(20), Some("https://docs.example"));
//! ```
//!
//! Offsets are byte offsets into [`ParsedDocument::plain_text`].
//!
//! Developer credits are produced as markup by [`CreditsFormatter`] and fed
//! back through the parser. [`Renderer`] writes a parsed document to a
//! terminal.

mod credits;
mod parser;
mod render;
mod style;

pub use credits::{split_names, CreditsConfig, CreditsFormatter};
pub use parser::{parse, MarkupParser};
pub use render::{RenderMode, Renderer};
pub use style::{ParsedDocument, Segment, StyleKind, StyleRange};
