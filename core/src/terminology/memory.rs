use super::fhir::Parameters;
use super::TerminologyService;
use crate::error::Result;
use crate::types::Concept;
use std::cell::RefCell;
use std::collections::HashMap;

/// Terminology service answering from fixed tables
///
/// ECL expressions without a registered expansion evaluate to the empty
/// set, and concepts without registered properties have no defining
/// relationships. Every query is recorded so callers can assert which
/// lookups were issued.
///
/// # Example
///
/// ```
/// use rrscat_core::terminology::{StaticTerminology, TerminologyService};
///
/// let service = StaticTerminology::new()
///     .with_expansion(">> 169069000", &["169069000", "77477000"]);
///
/// let codes = service.expand_value_set(">> 169069000").unwrap();
/// assert_eq!(codes.len(), 2);
/// assert!(service.expand_value_set("<< 404684003").unwrap().is_empty());
/// assert_eq!(service.queries().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct StaticTerminology {
    healthy: bool,
    expansions: HashMap<String, Vec<Concept>>,
    properties: HashMap<Concept, Parameters>,
    queries: RefCell<Vec<String>>,
}

impl StaticTerminology {
    /// Creates a healthy service with no content
    pub fn new() -> Self {
        Self {
            healthy: true,
            ..Default::default()
        }
    }

    /// Builder: Set the reported health status
    pub fn with_health(mut self, healthy: bool) -> Self {
        self.healthy = healthy;
        self
    }

    /// Builder: Register the result of an ECL expression
    pub fn with_expansion(mut self, ecl: &str, codes: &[&str]) -> Self {
        self.expansions.insert(
            ecl.to_string(),
            codes.iter().map(|c| Concept::from(*c)).collect(),
        );
        self
    }

    /// Builder: Register defining relationships as `(qualifier, value)` pairs
    pub fn with_relationships(mut self, code: &str, pairs: &[(&str, &str)]) -> Self {
        self.properties.insert(
            Concept::from(code),
            Parameters::from_defining_relationships(pairs),
        );
        self
    }

    /// Builder: Register a raw lookup response
    pub fn with_properties(mut self, code: &str, parameters: Parameters) -> Self {
        self.properties.insert(Concept::from(code), parameters);
        self
    }

    /// ECL expressions and lookups issued so far, in order
    pub fn queries(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }
}

impl TerminologyService for StaticTerminology {
    fn check_health(&self) -> Result<bool> {
        Ok(self.healthy)
    }

    fn expand_value_set(&self, ecl: &str) -> Result<Vec<Concept>> {
        self.queries.borrow_mut().push(ecl.to_string());
        Ok(self.expansions.get(ecl).cloned().unwrap_or_default())
    }

    fn lookup_properties(&self, concept: &Concept, _system: &str) -> Result<Parameters> {
        self.queries
            .borrow_mut()
            .push(format!("$lookup {}", concept));
        Ok(self.properties.get(concept).cloned().unwrap_or_default())
    }
}
