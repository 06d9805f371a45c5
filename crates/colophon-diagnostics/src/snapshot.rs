//! Input data for the installation-details report.
//!
//! Everything the report shows is captured in an [`EnvironmentSnapshot`]
//! before the report is built, so building never reads live process state.
//! Snapshots deserialize from YAML or JSON:
//!
//! ```yaml
//! generated_at: 2024-03-01T09:30:00
//! properties:
//!   os.name: linux
//! components:
//!   - name: colophon-core
//!     version: 2.1.0
//!     signers:
//!       - subject: "CN=Release Bot, O=Example"
//!         trusted: true
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A certificate that signed a component, reduced to what the report uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerCertificate {
    /// Subject distinguished name in RFC 4514 form.
    pub subject: String,
    /// Whether the certificate chains to a trusted root.
    #[serde(default)]
    pub trusted: bool,
}

impl SignerCertificate {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            trusted: false,
        }
    }

    pub fn trusted(mut self, trusted: bool) -> Self {
        self.trusted = trusted;
        self
    }
}

/// An installed software unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentInfo {
    pub name: String,
    pub version: String,
    /// Signer certificates in the order the host reported them.
    #[serde(default)]
    pub signers: Vec<SignerCertificate>,
}

impl ComponentInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            signers: Vec::new(),
        }
    }

    /// Adds a signer certificate.
    pub fn signer(mut self, certificate: SignerCertificate) -> Self {
        self.signers.push(certificate);
        self
    }

    /// Returns `true` if any signer belongs to a trusted chain.
    pub fn has_trusted_signer(&self) -> bool {
        self.signers.iter().any(|s| s.trusted)
    }
}

/// An immutable capture of the host environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentSnapshot {
    pub generated_at: NaiveDateTime,
    #[serde(default)]
    pub properties: HashMap<String, String>,
    #[serde(default)]
    pub components: Vec<ComponentInfo>,
}

impl EnvironmentSnapshot {
    pub fn new(generated_at: NaiveDateTime) -> Self {
        Self {
            generated_at,
            properties: HashMap::new(),
            components: Vec::new(),
        }
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn component(mut self, component: ComponentInfo) -> Self {
        self.components.push(component);
        self
    }
}
