//! Developer credits rendered as link markup.
//!
//! [`CreditsFormatter`] turns a list of names into markup for
//! [`MarkupParser`](crate::MarkupParser): every name becomes a link to its
//! profile page, names are joined with `", "` and the last one gets an
//! `"and "`. Lines are broken by a soft character count rather than a real
//! column layout.
//!
//! ```rust
//! use colophon_markup::CreditsFormatter;
//!
//! let markup = CreditsFormatter::default().format(&["ann", "bo"]);
//! assert_eq!(
//!     markup,
//!     "Developed by\n  [ann](https://github.com/ann), and [bo](https://github.com/bo).\n\n  \
//!      Many thanks for your support.\n\n"
//! );
//! ```

use serde::{Deserialize, Serialize};

/// Text and layout settings for the credits paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditsConfig {
    /// Sentence placed on its own line before the names.
    pub header: String,
    /// Sentence placed after the names.
    pub closing: String,
    /// Prefix the name is appended to, forming the profile link.
    pub profile_url_prefix: String,
    /// Name-character count at which a line break is inserted.
    pub wrap_at: usize,
    /// Indentation written after every line break inside the paragraph.
    pub indent: String,
}

impl Default for CreditsConfig {
    fn default() -> Self {
        Self {
            header: "Developed by".to_string(),
            closing: "Many thanks for your support.".to_string(),
            profile_url_prefix: "https://github.com/".to_string(),
            wrap_at: 80,
            indent: "  ".to_string(),
        }
    }
}

/// Formats developer names as link markup.
#[derive(Debug, Clone, Default)]
pub struct CreditsFormatter {
    config: CreditsConfig,
}

impl CreditsFormatter {
    pub fn new(config: CreditsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CreditsConfig {
        &self.config
    }

    /// Returns the profile link for `name`.
    pub fn profile_url(&self, name: &str) -> String {
        format!("{}{}", self.config.profile_url_prefix, name)
    }

    /// Formats `names` as markup.
    ///
    /// After each name token the running count of name characters since the
    /// last break is checked: if the count plus this name's length reaches
    /// `wrap_at`, a line break and indent are written and the count resets,
    /// otherwise the name's length is added. The check also runs after the
    /// last name, so a break may follow the final period.
    ///
    /// An empty list produces the header followed by the closing sentence.
    pub fn format<S: AsRef<str>>(&self, names: &[S]) -> String {
        let cfg = &self.config;
        let mut out = String::new();
        out.push_str(&cfg.header);
        out.push('\n');
        out.push_str(&cfg.indent);

        let mut line_chars = 0usize;
        let last = names.len().saturating_sub(1);

        for (i, name) in names.iter().enumerate() {
            let name = name.as_ref();
            let link = format!("[{}]({})", name, self.profile_url(name));
            if i == last {
                out.push_str("and ");
                out.push_str(&link);
                out.push_str(".\n\n");
            } else {
                out.push_str(&link);
                out.push_str(", ");
            }

            let name_chars = name.chars().count();
            if line_chars + name_chars >= cfg.wrap_at {
                out.push('\n');
                out.push_str(&cfg.indent);
                line_chars = 0;
            } else {
                line_chars += name_chars;
            }
        }

        out.push_str(&cfg.indent);
        out.push_str(&cfg.closing);
        out.push_str("\n\n");
        out
    }
}

/// Splits a comma-separated name list, trimming entries and dropping empty ones.
pub fn split_names(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
