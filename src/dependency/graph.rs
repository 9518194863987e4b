use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use super::{ArtifactCoordinate, ArtifactSet, Scope};
use crate::error::{AuditError, Result};

pub const DEFAULT_GRAPH_FILE: &str = "dependency-graph.toml";

/// Project the graph was resolved for
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectInfo {
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub artifact: String,
    #[serde(default)]
    pub version: String,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ProjectInfo {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.artifact)
    }
}

/// One `[[artifact]]` entry of the graph file
#[derive(Debug, Clone, Deserialize)]
pub struct GraphArtifact {
    pub group: String,
    pub artifact: String,
    pub version: String,
    #[serde(default)]
    pub scope: Scope,
    /// Explicitly declared by the project
    #[serde(default)]
    pub direct: bool,
    /// Declared licenses; `None` when the build tool did not export them
    pub licenses: Option<Vec<String>>,
}

impl GraphArtifact {
    pub fn coordinate(&self) -> ArtifactCoordinate {
        ArtifactCoordinate::new(&self.group, &self.artifact, &self.version, self.scope)
    }
}

/// Resolved dependency graph handed over by the build tool
#[derive(Debug, Clone, Deserialize)]
pub struct DependencyGraph {
    #[serde(default)]
    pub project: ProjectInfo,
    #[serde(rename = "artifact", default)]
    pub artifacts: Vec<GraphArtifact>,
}

impl DependencyGraph {
    /// Parse a graph file from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let graph_error = |reason: String| AuditError::Graph {
            path: path_ref.to_path_buf(),
            reason,
        };

        let content = std::fs::read_to_string(path_ref)
            .map_err(|e| graph_error(format!("cannot read file: {}", e)))?;

        if content.trim().is_empty() {
            return Err(graph_error("file is empty".to_string()));
        }

        let mut graph: DependencyGraph =
            toml::from_str(&content).map_err(|e| graph_error(e.to_string()))?;

        graph.artifacts.retain(|entry| {
            let blank = [&entry.group, &entry.artifact, &entry.version]
                .iter()
                .any(|part| part.trim().is_empty());
            if blank {
                warn!(
                    "Skipping artifact with incomplete coordinate '{}:{}:{}' in {}",
                    entry.group,
                    entry.artifact,
                    entry.version,
                    path_ref.display()
                );
            }
            !blank
        });

        if graph.artifacts.is_empty() {
            warn!("Dependency graph contains no artifacts: {}", path_ref.display());
        }

        Ok(graph)
    }

    /// Every artifact of the resolved graph, direct and transitive
    pub fn all_artifacts(&self) -> ArtifactSet {
        self.artifacts.iter().map(GraphArtifact::coordinate).collect()
    }

    /// Artifacts the project declares itself
    pub fn declared_artifacts(&self) -> ArtifactSet {
        self.artifacts
            .iter()
            .filter(|entry| entry.direct)
            .map(GraphArtifact::coordinate)
            .collect()
    }

    /// Find the graph file in the current directory or its parents
    pub fn find() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let candidate = current.join(DEFAULT_GRAPH_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                break;
            }
        }

        None
    }
}
