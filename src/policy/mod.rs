pub mod matcher;
pub mod pattern;

// Re-export main types
pub use matcher::{scan, LicenseMap, ViolationMap, NONE_LICENSE};
pub use pattern::{parse_as_regex, ForbiddenPattern, ForbiddenPatterns, REGEX_PREFIX};
