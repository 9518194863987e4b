use crate::dependency::{cumulative, retain_scopes, transitive, DependencyGraph, Scope};
use crate::error::Result;
use crate::license::{licenses_of, LicenseResolver};
use crate::policy::{scan, ForbiddenPatterns, LicenseMap, ViolationMap};

/// Everything one audit run produces
#[derive(Debug, Clone, Default)]
pub struct AuditOutcome {
    /// Licenses of the declared dependencies
    pub direct: LicenseMap,
    /// Licenses of the dependencies pulled in indirectly
    pub transitive: LicenseMap,
    /// Licenses of the whole scan target
    pub licenses: LicenseMap,
    pub violations: ViolationMap,
}

/// Partition the graph, resolve licenses of the cumulative set once, and
/// match them against the denylist.
pub fn run_audit(
    graph: &DependencyGraph,
    resolver: &dyn LicenseResolver,
    patterns: &ForbiddenPatterns,
    scopes: &[Scope],
) -> Result<AuditOutcome> {
    let all = retain_scopes(&graph.all_artifacts(), scopes);
    let direct = retain_scopes(&graph.declared_artifacts(), scopes);

    let transitive_deps = transitive(&all, &direct);
    let scan_target = cumulative(&all, &direct);

    let licenses = resolver.resolve_all(&scan_target)?;
    let violations = scan(&licenses, patterns);

    Ok(AuditOutcome {
        direct: licenses_of(&licenses, &direct),
        transitive: licenses_of(&licenses, &transitive_deps),
        licenses,
        violations,
    })
}
