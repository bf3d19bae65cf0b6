//! Terminology service capability and its implementations
//!
//! The classifier never talks to the network directly; it is handed a
//! [`TerminologyService`] that evaluates ECL queries and concept lookups.
//! [`FhirTerminologyClient`] implements it over HTTP against a FHIR
//! terminology server, [`StaticTerminology`] answers from fixed tables.

mod client;
pub mod ecl;
pub mod fhir;
mod memory;

pub use client::FhirTerminologyClient;
pub use fhir::Parameters;
pub use memory::StaticTerminology;

use crate::error::Result;
use crate::types::Concept;

/// Operations the engine consumes from a terminology service
pub trait TerminologyService {
    /// Returns `true` if the service reports an active status
    fn check_health(&self) -> Result<bool>;

    /// Evaluates an ECL expression and returns the matching concepts
    fn expand_value_set(&self, ecl: &str) -> Result<Vec<Concept>>;

    /// Returns all properties of a concept, including nested defining relationships
    fn lookup_properties(&self, concept: &Concept, system: &str) -> Result<Parameters>;
}
