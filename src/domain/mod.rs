//! Domain logic - pure version rules independent of git operations

pub mod branch;
pub mod tag;
pub mod version;

pub use branch::BranchContext;
pub use tag::TagResolver;
pub use version::{SemanticVersion, VersionBump};
