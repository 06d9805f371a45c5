//! Installation-details reports.
//!
//! This crate turns a snapshot of the host environment into the plain-text
//! report shown behind an about screen's "installation details" button:
//!
//! - [`EnvironmentSnapshot`]: generation time, properties and installed
//!   components, captured up front so building the report is pure
//! - [`build`] / [`build_report`]: the deterministic report layout
//! - [`extract_common_names`]: signer attribution from certificate subject
//!   distinguished names
//! - [`HostProbe`]: where snapshots come from
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use colophon_diagnostics::{ComponentInfo, EnvironmentSnapshot, SignerCertificate};
//!
//! let at = NaiveDate::from_ymd_opt(2024, 3, 1)
//!     .and_then(|d| d.and_hms_opt(9, 30, 0))
//!     .unwrap();
//!
//! let snapshot = EnvironmentSnapshot::new(at)
//!     .property("os.name", "linux")
//!     .component(
//!         ComponentInfo::new("core", "2.1.0")
//!             .signer(SignerCertificate::new("CN=Release Bot, O=Example").trusted(true)),
//!     );
//!
//! let report = snapshot.report();
//! assert!(report.starts_with("Generated at 2024-03-01T09:30:00.000"));
//! assert!(report.contains("os.name: linux\n"));
//! assert!(report.ends_with("core (2.1.0) [signed by Release Bot] [trusted]\n"));
//! ```

mod dn;
mod error;
mod host;
mod report;
mod snapshot;

pub use dn::{extract_common_names, parse_distinguished_name, NameComponent};
pub use error::{MalformedNameError, Result};
pub use host::{HostProbe, ProcessHost, StaticHost};
pub use report::{build, build_report, signer_names, COMPONENTS_HEADING, PROPERTIES_HEADING};
pub use snapshot::{ComponentInfo, EnvironmentSnapshot, SignerCertificate};
