use super::{ArtifactSet, Scope};

/// Artifacts pulled in indirectly: `all \ direct`.
///
/// Both inputs are only borrowed; the result is a freshly allocated set.
pub fn transitive(all: &ArtifactSet, direct: &ArtifactSet) -> ArtifactSet {
    all.difference(direct).cloned().collect()
}

/// Full scan target: `all ∪ direct`.
///
/// An artifact declared directly but missing from `all` is still included.
pub fn cumulative(all: &ArtifactSet, direct: &ArtifactSet) -> ArtifactSet {
    all.union(direct).cloned().collect()
}

/// Keep only artifacts whose scope is listed
pub fn retain_scopes(artifacts: &ArtifactSet, scopes: &[Scope]) -> ArtifactSet {
    artifacts
        .iter()
        .filter(|artifact| scopes.contains(&artifact.scope))
        .cloned()
        .collect()
}
