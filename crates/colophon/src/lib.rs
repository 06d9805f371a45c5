//! About screens and installation-details reports for applications.
//!
//! `colophon` ties the two library crates together:
//!
//! - [`colophon_markup`]: the `[text](link)` markup parser, developer
//!   credits and terminal rendering
//! - [`colophon_diagnostics`]: the installation-details report and
//!   certificate signer attribution
//!
//! On top of them it adds a YAML [`Config`], about-text templating with
//! MiniJinja ([`compose_about_text`]), the assembled [`AboutPage`] and the
//! `colophon` command line ([`cli`]).
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use colophon::{AboutFacts, AboutPage, Config};
//! use colophon::markup::{RenderMode, Renderer};
//!
//! let config = Config::from_yaml("name: Ledger\ndevelopers: ann, bo").unwrap();
//! let built = NaiveDate::from_ymd_opt(2024, 3, 14)
//!     .and_then(|d| d.and_hms_opt(12, 0, 0))
//!     .unwrap();
//! let facts = AboutFacts::new(&config.name, "2.1.0", built);
//!
//! let page = AboutPage::assemble(&config, &facts).unwrap();
//! let text = page.render(&Renderer::new(RenderMode::Plain));
//! assert!(text.starts_with("Ledger 2.1.0\nBuilt Mar 2024 for "));
//! assert!(text.contains("Developed by\n  ann, and bo.\n"));
//! ```

pub mod cli;

mod about;
mod config;
mod error;

pub use about::{compose_about_text, AboutFacts, AboutPage};
pub use config::{read_yaml_file, Config, NameList};
pub use error::{ColophonError, Result};

pub use colophon_diagnostics as diagnostics;
pub use colophon_markup as markup;
