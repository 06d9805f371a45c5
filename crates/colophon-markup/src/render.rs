//! Terminal and plain-text output for parsed documents.
//!
//! Where the bold first line overlaps a hyperlink, both treatments are
//! applied to the shared characters.

use console::Style;

use crate::style::{ParsedDocument, Segment};

/// How a document is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Styled when stdout supports colors, plain otherwise.
    #[default]
    Auto,
    /// Always emit ANSI styling.
    Term,
    /// Plain text only.
    Plain,
}

impl RenderMode {
    /// Resolves [`RenderMode::Auto`] against the current terminal.
    pub fn resolve(self) -> RenderMode {
        match self {
            RenderMode::Auto if console::colors_enabled() => RenderMode::Term,
            RenderMode::Auto => RenderMode::Plain,
            other => other,
        }
    }
}

/// Renders a [`ParsedDocument`] for a terminal.
#[derive(Debug, Clone)]
pub struct Renderer {
    mode: RenderMode,
    hyperlinks: bool,
}

impl Renderer {
    pub fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            hyperlinks: false,
        }
    }

    /// Wraps link text in OSC 8 escapes so terminals make it clickable.
    ///
    /// Only used in [`RenderMode::Term`].
    pub fn hyperlinks(mut self, enabled: bool) -> Self {
        self.hyperlinks = enabled;
        self
    }

    pub fn render(&self, doc: &ParsedDocument) -> String {
        match self.mode.resolve() {
            RenderMode::Term => self.render_term(doc),
            _ => doc.plain_text.clone(),
        }
    }

    fn render_term(&self, doc: &ParsedDocument) -> String {
        let mut out = String::with_capacity(doc.plain_text.len() * 2);
        for segment in doc.segments() {
            self.append_segment(&mut out, &segment);
        }
        out
    }

    fn append_segment(&self, out: &mut String, segment: &Segment<'_>) {
        if segment.styles.is_empty() {
            out.push_str(segment.text);
            return;
        }

        let link = segment.link_target();
        let styled = segment_style(segment.is_bold(), link.is_some())
            .apply_to(segment.text)
            .to_string();

        match link {
            Some(target) if self.hyperlinks => {
                out.push_str(&format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", target, styled));
            }
            _ => out.push_str(&styled),
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderMode::Auto)
    }
}

/// Composes the style for a segment from its active treatments.
fn segment_style(bold: bool, link: bool) -> Style {
    let mut style = Style::new().force_styling(true);
    if bold {
        style = style.bold();
    }
    if link {
        style = style.underlined().blue();
    }
    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn plain_mode_returns_text() {
        let doc = parse("Title [x](u)\nbody");
        assert_eq!(Renderer::new(RenderMode::Plain).render(&doc), "Title x\nbody");
    }

    #[test]
    fn term_mode_styles_bold_line() {
        let doc = parse("Title\nbody");
        let out = Renderer::new(RenderMode::Term).render(&doc);
        assert!(out.contains("\x1b[1m"));
        assert!(out.ends_with("\nbody"));
    }

    #[test]
    fn overlapping_link_gets_both_styles() {
        let doc = parse("About [it](u)\nrest");
        let out = Renderer::new(RenderMode::Term).render(&doc);
        let expected = Style::new()
            .force_styling(true)
            .bold()
            .underlined()
            .blue()
            .apply_to("it")
            .to_string();
        assert!(out.contains(&expected), "{:?}", out);
    }

    #[test]
    fn hyperlink_escapes() {
        let doc = parse("\n[docs](https://d.example)");
        let out = Renderer::new(RenderMode::Term).hyperlinks(true).render(&doc);
        assert!(out.contains("\x1b]8;;https://d.example\x1b\\"));
        assert!(out.ends_with("\x1b]8;;\x1b\\"));
    }

    #[test]
    fn hyperlink_escapes_ignored_in_plain_mode() {
        let doc = parse("\n[docs](https://d.example)");
        let out = Renderer::new(RenderMode::Plain).hyperlinks(true).render(&doc);
        assert_eq!(out, "\ndocs");
    }

    #[test]
    fn explicit_modes_resolve_to_themselves() {
        assert_eq!(RenderMode::Term.resolve(), RenderMode::Term);
        assert_eq!(RenderMode::Plain.resolve(), RenderMode::Plain);
    }
}
