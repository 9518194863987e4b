use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

pub mod graph;
pub mod partition;

pub use graph::{DependencyGraph, GraphArtifact, ProjectInfo};
pub use partition::{cumulative, retain_scopes, transitive};

/// Ordered set of artifacts, keyed by group/artifact/version
pub type ArtifactSet = BTreeSet<ArtifactCoordinate>;

/// Maven dependency scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    Compile,
    Runtime,
    Provided,
    Test,
    System,
    Import,
}

impl Scope {
    /// Scopes that end up on the runtime classpath
    pub const RUNTIME_CLASSPATH: [Scope; 2] = [Scope::Compile, Scope::Runtime];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Compile => "compile",
            Scope::Runtime => "runtime",
            Scope::Provided => "provided",
            Scope::Test => "test",
            Scope::System => "system",
            Scope::Import => "import",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved dependency artifact.
///
/// Identity is group + artifact + version. The scope is carried along for
/// reporting but two coordinates differing only in scope are the same
/// member of an [`ArtifactSet`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactCoordinate {
    pub group: String,
    pub artifact: String,
    pub version: String,
    #[serde(default)]
    pub scope: Scope,
}

impl ArtifactCoordinate {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
        scope: Scope,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
            scope,
        }
    }

    /// GAV label `group:artifact:version:scope` used in reports
    pub fn label(&self) -> String {
        format!("{}:{}:{}:{}", self.group, self.artifact, self.version, self.scope)
    }

    fn identity(&self) -> (&str, &str, &str) {
        (&self.group, &self.artifact, &self.version)
    }
}

impl PartialEq for ArtifactCoordinate {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for ArtifactCoordinate {}

impl Hash for ArtifactCoordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl PartialOrd for ArtifactCoordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ArtifactCoordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identity().cmp(&other.identity())
    }
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
