use crate::classification::{
    classify_sorted, map_procedure, resolve_laterality, LateralityIndex, OverrideSets,
};
use crate::error::Result;
use crate::terminology::TerminologyService;
use crate::types::{ClassifiedOrder, Concept, Contrast, FocusProcedureList, Laterality, Role};
use std::fmt;

/// Reference data built once per run and shared read-only by every classification
#[derive(Debug, Clone, Default)]
pub struct ReferenceSets {
    pub laterality: LateralityIndex,
    pub overrides: OverrideSets,
    pub focus: FocusProcedureList,
}

impl ReferenceSets {
    /// Builds the laterality index and override sets from the terminology service
    pub fn build<S: TerminologyService>(service: &S, focus: FocusProcedureList) -> Result<Self> {
        Ok(Self {
            laterality: LateralityIndex::build(service)?,
            overrides: OverrideSets::build(service)?,
            focus,
        })
    }
}

/// Classifier for single radiology order codes
///
/// Resolves the defining relationships of an order concept into a
/// [`ClassifiedOrder`].
///
/// # Example
///
/// ```
/// use rrscat_core::terminology::StaticTerminology;
/// use rrscat_core::{Concept, FocusProcedureList, OrderClassifier, ReferenceSets};
///
/// let service = StaticTerminology::new()
///     .with_relationships("169069000", &[("260686004", "312251004")])
///     .with_expansion(">> 169069000", &["169069000", "77477000"]);
///
/// let references = ReferenceSets {
///     focus: FocusProcedureList::new(vec![(Concept::from("77477000"), "CT".into())]),
///     ..Default::default()
/// };
///
/// let classifier = OrderClassifier::new(&service, &references, "http://snomed.info/sct");
/// let result = classifier.classify(&Concept::from("169069000")).unwrap();
///
/// let order = result.order().unwrap();
/// assert_eq!(order.base_procedure.as_str(), "77477000");
/// assert_eq!(order.laterality.code(), "");
/// ```
pub struct OrderClassifier<'a, S> {
    service: &'a S,
    references: &'a ReferenceSets,
    system: &'a str,
}

impl<'a, S: TerminologyService> OrderClassifier<'a, S> {
    pub fn new(service: &'a S, references: &'a ReferenceSets, system: &'a str) -> Self {
        Self {
            service,
            references,
            system,
        }
    }

    /// Classifies one order concept
    ///
    /// # Algorithm
    ///
    /// 1. Retrieve the defining relationships and sort them by role index
    /// 2. The first procedure relationship establishes the order code as base procedure
    /// 3. Each site relationship is resolved for laterality and de-lateralized;
    ///    a detected side is kept across later sites
    /// 4. Any contrast relationship marks the order as with contrast
    /// 5. Bilateral-procedure override, then focus procedure mapping,
    ///    then contrast-free override
    ///
    /// # Errors
    ///
    /// Returns an error only if the terminology service fails. An order that
    /// cannot be mapped is reported as [`Classification::Unresolved`].
    pub fn classify(&self, code: &Concept) -> Result<Classification> {
        let relationships = classify_sorted(self.service, code, self.system)?;
        let overrides = &self.references.overrides;

        let mut procedure: Option<Concept> = None;
        let mut laterality = Laterality::None;
        let mut site = Concept::default();
        let mut contrast = Contrast::Unspecified;

        for relationship in &relationships {
            match relationship.role {
                Role::Procedure => {
                    if procedure.is_none() {
                        procedure = Some(code.clone());
                    }
                }
                Role::Site => {
                    let (detected, normalized) = resolve_laterality(
                        self.service,
                        &relationship.target,
                        &self.references.laterality,
                    )?;
                    if !detected.is_none() {
                        laterality = detected;
                    }
                    if let Some(p) = &procedure {
                        laterality = overrides.apply_bilateral_override(p.as_str(), laterality);
                    }
                    site = normalized;
                }
                Role::Contrast => contrast = Contrast::WithContrast,
                Role::Laterality | Role::Unknown => {}
            }
        }

        let Some(base) = procedure else {
            return Ok(Classification::Unresolved {
                source_code: code.clone(),
                reason: UnresolvedReason::NoProcedure,
            });
        };

        let laterality = overrides.apply_bilateral_override(base.as_str(), laterality);
        let mapped = map_procedure(self.service, &base, &self.references.focus)?;
        let contrast = overrides.apply_contrast_override(base.as_str(), contrast);

        if mapped == base {
            return Ok(Classification::Unresolved {
                source_code: code.clone(),
                reason: UnresolvedReason::NoFocusMatch,
            });
        }

        Ok(Classification::Resolved(ClassifiedOrder {
            source_code: code.clone(),
            base_procedure: mapped,
            body_site: site,
            laterality,
            contrast,
        }))
    }
}

/// Result of classifying one order code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Resolved(ClassifiedOrder),
    Unresolved {
        source_code: Concept,
        reason: UnresolvedReason,
    },
}

impl Classification {
    /// Returns the classified order if resolution succeeded
    pub fn order(&self) -> Option<&ClassifiedOrder> {
        match self {
            Classification::Resolved(order) => Some(order),
            Classification::Unresolved { .. } => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Classification::Resolved(_))
    }
}

/// Why an order code could not be classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// The concept has no procedure/modality relationship
    NoProcedure,
    /// No focus procedure is an ancestor of the concept
    NoFocusMatch,
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedReason::NoProcedure => write!(f, "no procedure relationship"),
            UnresolvedReason::NoFocusMatch => {
                write!(f, "unable to determine base radiological procedure")
            }
        }
    }
}
