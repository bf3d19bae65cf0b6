//! Classification engine
//!
//! Resolves the defining relationships of one order concept into its
//! normalized facets:
//! - [`properties`]: role-tagging of defining relationships
//! - [`laterality`]: sidedness detection and site de-lateralization
//! - [`overrides`]: bilateral-procedure and contrast-free rules
//! - [`procedure`]: ancestor mapping onto the focus procedure list

pub mod laterality;
pub mod overrides;
pub mod procedure;
pub mod properties;

pub use laterality::{fetch_lateralized_structures, resolve_laterality, LateralityIndex};
pub use overrides::OverrideSets;
pub use procedure::map_procedure;
pub use properties::{classify, classify_sorted, extract_relationships};
