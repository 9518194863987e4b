use rayon::prelude::*;
use std::collections::HashMap;

use crate::dependency::{ArtifactCoordinate, ArtifactSet, DependencyGraph};
use crate::error::{AuditError, Result};
use crate::policy::LicenseMap;

pub mod pom;

pub use pom::PomRepository;

/// Source of license metadata for artifacts.
///
/// Implementations must return an empty list, not an error, for artifacts
/// that declare no license.
pub trait LicenseResolver: Sync {
    fn resolve(&self, coordinate: &ArtifactCoordinate) -> Result<Vec<String>>;

    /// Resolve a whole set in parallel, keyed by GAV label.
    ///
    /// The first failure aborts the batch; no partial map is returned.
    fn resolve_all(&self, artifacts: &ArtifactSet) -> Result<LicenseMap> {
        let resolved = artifacts
            .par_iter()
            .map(|artifact| {
                self.resolve(artifact)
                    .map(|licenses| (artifact.label(), licenses))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(resolved.into_iter().collect())
    }
}

/// Licenses embedded in the dependency graph file by the build tool
#[derive(Debug, Default)]
pub struct DeclaredLicenses {
    declared: HashMap<ArtifactCoordinate, Option<Vec<String>>>,
}

impl DeclaredLicenses {
    pub fn from_graph(graph: &DependencyGraph) -> Self {
        let mut declared = HashMap::with_capacity(graph.artifacts.len());
        for entry in &graph.artifacts {
            declared
                .entry(entry.coordinate())
                .or_insert_with(|| entry.licenses.clone());
        }
        Self { declared }
    }
}

impl LicenseResolver for DeclaredLicenses {
    fn resolve(&self, coordinate: &ArtifactCoordinate) -> Result<Vec<String>> {
        match self.declared.get(coordinate) {
            Some(Some(licenses)) => Ok(licenses.clone()),
            Some(None) => Err(AuditError::Resolution {
                coordinate: coordinate.label(),
                reason: "no license metadata exported for this artifact".to_string(),
            }),
            None => Err(AuditError::Resolution {
                coordinate: coordinate.label(),
                reason: "artifact is not part of the dependency graph".to_string(),
            }),
        }
    }
}

/// Restrict a resolved map to the artifacts of `subset`
pub fn licenses_of(resolved: &LicenseMap, subset: &ArtifactSet) -> LicenseMap {
    subset
        .iter()
        .filter_map(|artifact| {
            let label = artifact.label();
            resolved.get(&label).map(|licenses| (label, licenses.clone()))
        })
        .collect()
}
