//! Core type definitions for radiology order classification
//!
//! This module provides the fundamental types used throughout the rrscat library:
//! - [`Concept`]: Opaque SNOMED CT identifier
//! - [`Role`]: Semantic role of a defining relationship (procedure, site, laterality, contrast)
//! - [`Relationship`]: Role-tagged qualifier/target pair
//! - [`Laterality`] and [`Contrast`]: Normalized facets of an order
//! - [`ClassifiedOrder`]: Output record for one order code
//! - [`FocusProcedureList`]: Ordered canonical procedure vocabulary
//! - [`PipelineConfig`]: Configuration for a classification run

mod concept;
mod config;
mod enums;
mod focus;
mod order;
mod relationship;

pub use concept::{is_sctid, Concept};
pub use config::{PipelineConfig, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT};
pub use enums::{Contrast, Laterality, Role, Side, UNKNOWN};
pub use focus::FocusProcedureList;
pub use order::ClassifiedOrder;
pub use relationship::{role_for_qualifier, sort_by_role, Relationship};
