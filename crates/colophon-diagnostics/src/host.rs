//! Host introspection for testability.
//!
//! The report builder only sees [`EnvironmentSnapshot`]s. A [`HostProbe`]
//! produces them: [`ProcessHost`] from the running process, [`StaticHost`]
//! from fixed data in tests.

use chrono::{Local, NaiveDateTime};
use std::collections::HashMap;

use crate::snapshot::{ComponentInfo, EnvironmentSnapshot};

/// Supplies the data a report is built from.
pub trait HostProbe: Send + Sync {
    /// The moment the snapshot is taken.
    fn now(&self) -> NaiveDateTime;

    /// Key/value properties describing the host.
    fn properties(&self) -> HashMap<String, String>;

    /// The installed components.
    fn components(&self) -> Vec<ComponentInfo>;

    /// Captures everything above into one snapshot.
    fn snapshot(&self) -> EnvironmentSnapshot {
        EnvironmentSnapshot {
            generated_at: self.now(),
            properties: self.properties(),
            components: self.components(),
        }
    }
}

// === Real implementation ===

/// Reads properties from the running process.
///
/// Properties are the platform constants (`os.name`, `os.arch`,
/// `os.family`), `process.id`, `process.cwd` when available, and every
/// environment variable as `env.<NAME>`. The process has no component
/// registry of its own, so components are supplied by the caller.
#[derive(Debug, Default, Clone)]
pub struct ProcessHost {
    components: Vec<ComponentInfo>,
}

impl ProcessHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_components(mut self, components: Vec<ComponentInfo>) -> Self {
        self.components = components;
        self
    }
}

impl HostProbe for ProcessHost {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn properties(&self) -> HashMap<String, String> {
        let mut props = HashMap::new();
        props.insert("os.name".to_string(), std::env::consts::OS.to_string());
        props.insert("os.arch".to_string(), std::env::consts::ARCH.to_string());
        props.insert("os.family".to_string(), std::env::consts::FAMILY.to_string());
        props.insert("process.id".to_string(), std::process::id().to_string());
        if let Ok(cwd) = std::env::current_dir() {
            props.insert("process.cwd".to_string(), cwd.display().to_string());
        }
        for (key, value) in std::env::vars_os() {
            props.insert(
                format!("env.{}", key.to_string_lossy()),
                value.to_string_lossy().into_owned(),
            );
        }
        props
    }

    fn components(&self) -> Vec<ComponentInfo> {
        self.components.clone()
    }
}

// === Fixed implementation for testing ===

/// Returns the same snapshot every time.
#[derive(Debug, Clone)]
pub struct StaticHost {
    snapshot: EnvironmentSnapshot,
}

impl StaticHost {
    pub fn new(snapshot: EnvironmentSnapshot) -> Self {
        Self { snapshot }
    }
}

impl HostProbe for StaticHost {
    fn now(&self) -> NaiveDateTime {
        self.snapshot.generated_at
    }

    fn properties(&self) -> HashMap<String, String> {
        self.snapshot.properties.clone()
    }

    fn components(&self) -> Vec<ComponentInfo> {
        self.snapshot.components.clone()
    }

    fn snapshot(&self) -> EnvironmentSnapshot {
        self.snapshot.clone()
    }
}
