//! About text composition and the assembled about page.

use chrono::{Local, NaiveDateTime};
use colophon_markup::{CreditsFormatter, MarkupParser, ParsedDocument, Renderer};
use minijinja::{context, Environment};
use serde::Serialize;

use crate::config::Config;
use crate::error::Result;

/// Facts about the running build, available to the about template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AboutFacts {
    pub name: String,
    pub version: String,
    pub build_time: NaiveDateTime,
    pub os: String,
    pub arch: String,
}

impl AboutFacts {
    /// Creates facts for the current platform.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        build_time: NaiveDateTime,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            build_time,
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }

    /// Facts for this binary, stamped with the current time.
    pub fn current(name: impl Into<String>) -> Self {
        Self::new(
            name,
            env!("CARGO_PKG_VERSION"),
            Local::now().naive_local(),
        )
    }

    /// Overrides the platform fields.
    pub fn platform(mut self, os: impl Into<String>, arch: impl Into<String>) -> Self {
        self.os = os.into();
        self.arch = arch.into();
        self
    }

    /// The build month, e.g. `Mar 2024`.
    pub fn build_date(&self) -> String {
        self.build_time.format("%b %Y").to_string()
    }
}

/// Renders the about template with `facts`.
///
/// The template sees `name`, `version`, `build_date`, `os` and `arch`.
/// Trailing newlines in the template are preserved.
pub fn compose_about_text(template: &str, facts: &AboutFacts) -> Result<String> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    let text = env.render_str(
        template,
        context! {
            name => &facts.name,
            version => &facts.version,
            build_date => facts.build_date(),
            os => &facts.os,
            arch => &facts.arch,
        },
    )?;
    Ok(text)
}

/// The two texts an about screen displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AboutPage {
    /// The about text, with its first line bold.
    pub about: ParsedDocument,
    /// Developer credits, translators and third-party notices.
    pub contributions: ParsedDocument,
}

impl AboutPage {
    /// Composes and parses both texts.
    pub fn assemble(config: &Config, facts: &AboutFacts) -> Result<Self> {
        let about_text = compose_about_text(&config.about_template, facts)?;
        let about = MarkupParser::new().parse(&about_text);

        let names = config.developers.names();
        let mut contributions_text = CreditsFormatter::new(config.credits.clone()).format(&names);
        contributions_text.push_str(&config.translators);
        contributions_text.push_str(&config.other_software);
        let contributions = MarkupParser::new()
            .bold_first_line(false)
            .parse(&contributions_text);

        tracing::debug!(
            developers = names.len(),
            links = about.links().count() + contributions.links().count(),
            "assembled about page"
        );

        Ok(Self {
            about,
            contributions,
        })
    }

    /// Renders the about text, a blank line, then the contributions.
    pub fn render(&self, renderer: &Renderer) -> String {
        let mut about = renderer.render(&self.about);
        if !about.ends_with('\n') {
            about.push('\n');
        }
        format!("{}\n{}", about, renderer.render(&self.contributions))
    }
}
