pub mod audit;
pub mod config;
pub mod dependency;
pub mod error;
pub mod init;
pub mod license;
pub mod output;
pub mod policy;
pub mod report;

// Re-export main types for easy access
pub use audit::{run_audit, AuditOutcome};
pub use dependency::{ArtifactCoordinate, ArtifactSet, DependencyGraph, Scope};
pub use error::AuditError;
pub use license::{DeclaredLicenses, LicenseResolver, PomRepository};
pub use policy::{scan, ForbiddenPattern, ForbiddenPatterns, LicenseMap, ViolationMap, NONE_LICENSE};
