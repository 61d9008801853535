// Module exports for cross-reference processing

pub mod abbrev;
pub mod link;
pub mod normalize;

// Re-export the main linking API
pub use link::{build_cross_refs, CrossRefGraph, LinkStats};
pub use normalize::{standardize_citation, RefDiagnostics};
