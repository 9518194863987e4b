use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::pattern::ForbiddenPatterns;

/// Key under which artifacts declaring no license at all are recorded
pub const NONE_LICENSE: &str = "NONE";

/// Declared licenses per artifact label, as produced by a resolver
pub type LicenseMap = IndexMap<String, Vec<String>>;

/// Forbidden pattern -> labels of the artifacts violating it.
///
/// Holds one key per configured pattern in configured order, plus
/// [`NONE_LICENSE`], and nothing else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViolationMap(IndexMap<String, Vec<String>>);

impl ViolationMap {
    fn for_patterns(patterns: &ForbiddenPatterns) -> Self {
        let mut map = IndexMap::with_capacity(patterns.len() + 1);
        for entry in patterns.entries() {
            map.entry(entry.to_string()).or_insert_with(Vec::new);
        }
        map.entry(NONE_LICENSE.to_string()).or_insert_with(Vec::new);
        Self(map)
    }

    fn record(&mut self, key: &str, label: &str) {
        if let Some(labels) = self.0.get_mut(key) {
            labels.push(label.to_string());
        }
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    /// Artifacts without any declared license
    pub fn unlicensed(&self) -> &[String] {
        self.get(NONE_LICENSE).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(key, labels)| (key.as_str(), labels.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of (pattern, artifact) pairs recorded under configured patterns
    pub fn forbidden_count(&self, patterns: &ForbiddenPatterns) -> usize {
        patterns
            .entries()
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .filter_map(|entry| self.get(entry))
            .map(<[String]>::len)
            .sum()
    }

    /// True when any configured pattern has at least one violator.
    ///
    /// The implicit NONE key only counts when it was configured explicitly.
    pub fn has_forbidden(&self, patterns: &ForbiddenPatterns) -> bool {
        patterns
            .entries()
            .any(|entry| self.get(entry).is_some_and(|labels| !labels.is_empty()))
    }

    pub fn into_inner(self) -> IndexMap<String, Vec<String>> {
        self.0
    }
}

/// Match every artifact's licenses against the denylist.
///
/// An artifact is a violator only when *each* of its licenses matches some
/// forbidden pattern; one license outside the denylist exempts the artifact
/// entirely. A violator is recorded under every pattern its licenses
/// matched. Artifacts with no license are recorded under [`NONE_LICENSE`].
pub fn scan(artifact_licenses: &LicenseMap, patterns: &ForbiddenPatterns) -> ViolationMap {
    let mut violations = ViolationMap::for_patterns(patterns);

    for (label, licenses) in artifact_licenses {
        if licenses.is_empty() {
            violations.record(NONE_LICENSE, label);
            continue;
        }

        let matched: Option<Vec<&str>> = licenses
            .iter()
            .map(|license| patterns.match_of(license).map(|pattern| pattern.entry()))
            .collect();

        let Some(mut keys) = matched else {
            continue;
        };

        // two licenses hitting the same pattern still count once
        let mut seen = std::collections::HashSet::new();
        keys.retain(|key| seen.insert(*key));

        for key in keys {
            violations.record(key, label);
        }
    }

    violations
}
