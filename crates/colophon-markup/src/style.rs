//! Style ranges over parsed plain text.
//!
//! A [`ParsedDocument`] pairs the markup-stripped text with the ranges that
//! describe how to display it. Offsets are byte offsets into
//! [`ParsedDocument::plain_text`], so a range slices the text directly.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// The visual treatment a [`StyleRange`] asks for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StyleKind {
    /// Bold text (the first line of an about text).
    Bold,
    /// An underlined hyperlink pointing at `target`.
    Hyperlink {
        /// The link target exactly as written in the markup. Not validated.
        target: String,
    },
}

/// An annotation over a span of the plain text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyleRange {
    /// Byte offset of the first styled character.
    pub start: usize,
    /// Length of the span in bytes.
    pub length: usize,
    #[serde(flatten)]
    pub kind: StyleKind,
}

impl StyleRange {
    /// Creates a bold range.
    pub fn bold(start: usize, length: usize) -> Self {
        Self {
            start,
            length,
            kind: StyleKind::Bold,
        }
    }

    /// Creates a hyperlink range.
    pub fn hyperlink(start: usize, length: usize, target: impl Into<String>) -> Self {
        Self {
            start,
            length,
            kind: StyleKind::Hyperlink {
                target: target.into(),
            },
        }
    }

    /// Byte offset one past the last styled character.
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// The byte range covered by this style.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Returns `true` if `offset` falls inside this range.
    ///
    /// Empty ranges contain no offset.
    pub fn contains(&self, offset: usize) -> bool {
        self.range().contains(&offset)
    }

    pub fn is_bold(&self) -> bool {
        matches!(self.kind, StyleKind::Bold)
    }

    /// The link target, if this is a hyperlink.
    pub fn link_target(&self) -> Option<&str> {
        match &self.kind {
            StyleKind::Hyperlink { target } => Some(target),
            StyleKind::Bold => None,
        }
    }
}

/// The result of parsing markup: plain text plus sorted style ranges.
///
/// Ranges are sorted by `start`. Hyperlinks never overlap each other; the
/// bold first-line range may overlap hyperlinks on that line, in which case
/// both styles apply to the shared characters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub plain_text: String,
    pub styles: Vec<StyleRange>,
}

impl ParsedDocument {
    /// Returns the text covered by `style`.
    ///
    /// Returns an empty string if the range does not belong to this document.
    pub fn text_of(&self, style: &StyleRange) -> &str {
        self.plain_text.get(style.range()).unwrap_or("")
    }

    /// Iterates over the hyperlink ranges in offset order.
    pub fn links(&self) -> impl Iterator<Item = &StyleRange> {
        self.styles.iter().filter(|s| s.link_target().is_some())
    }

    /// Returns every style range that contains `offset`.
    pub fn styles_at(&self, offset: usize) -> impl Iterator<Item = &StyleRange> {
        // Sorted by start, so nothing past this index can contain the offset.
        let upper = self.styles.partition_point(|s| s.start <= offset);
        self.styles[..upper]
            .iter()
            .filter(move |s| s.contains(offset))
    }

    /// Returns the hyperlink target under `offset`, if any.
    ///
    /// This is the lookup a display layer performs after mapping a click to
    /// a text offset.
    pub fn link_at(&self, offset: usize) -> Option<&str> {
        self.styles_at(offset).find_map(StyleRange::link_target)
    }

    /// Splits the plain text into runs that share the same set of styles.
    ///
    /// The runs cover the whole text in order, so concatenating their `text`
    /// reproduces [`plain_text`](Self::plain_text).
    pub fn segments(&self) -> Vec<Segment<'_>> {
        let len = self.plain_text.len();
        let mut cuts: Vec<usize> = Vec::with_capacity(self.styles.len() * 2 + 2);
        cuts.push(0);
        cuts.push(len);
        for style in &self.styles {
            cuts.push(style.start.min(len));
            cuts.push(style.end().min(len));
        }
        cuts.sort_unstable();
        cuts.dedup();

        cuts.windows(2)
            .filter_map(|pair| {
                let range = pair[0]..pair[1];
                let text = self.plain_text.get(range.clone())?;
                let styles = self
                    .styles
                    .iter()
                    .filter(|s| s.start <= range.start && s.end() >= range.end)
                    .collect();
                Some(Segment {
                    text,
                    range,
                    styles,
                })
            })
            .collect()
    }
}

/// A run of plain text with the styles active over all of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub range: Range<usize>,
    pub styles: Vec<&'a StyleRange>,
}

impl Segment<'_> {
    pub fn is_bold(&self) -> bool {
        self.styles.iter().any(|s| s.is_bold())
    }

    pub fn link_target(&self) -> Option<&str> {
        self.styles.iter().find_map(|s| s.link_target())
    }
}
