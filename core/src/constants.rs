//! Fixed SNOMED CT concept identifiers and service URIs used by the engine

// Code systems
pub const SNOMED_CT_SYSTEM: &str = "http://snomed.info/sct";
pub const DEFAULT_TERMINOLOGY_URL: &str = "https://r4.ontoserver.csiro.au/fhir";
pub const FHIR_JSON: &str = "application/fhir+json";

// Relationship qualifiers (attribute types)
pub const PROCEDURE_QUALIFIER: &str = "260686004"; // Method
pub const SITE_QUALIFIER: &str = "405813007"; // Procedure site - Direct
pub const LATERALITY_QUALIFIER: &str = "272741003"; // Laterality
pub const CONTRAST_QUALIFIER: &str = "424361007"; // Using substance

// Root concepts
pub const BODY_STRUCTURE_ROOT: &str = "123037004";
pub const RADIOLOGY_PROCEDURE_ROOT: &str = "71388002"; // Procedure

// Laterality values
pub const LEFT: &str = "7771000";
pub const RIGHT: &str = "24028007";
pub const BILATERAL: &str = "51440002";

// Contrast values
pub const WITH_CONTRAST: &str = "373066001";
pub const WITHOUT_CONTRAST: &str = "373067005";

// Input map markers
pub const TARGET_EQUIVALENT: &str = "TARGET_EQUIVALENT";

/// Qualifier table mapping relationship types to semantic roles, in role-index order
pub const QUALIFIER_ROLES: [(&str, crate::types::Role); 4] = [
    (PROCEDURE_QUALIFIER, crate::types::Role::Procedure),
    (SITE_QUALIFIER, crate::types::Role::Site),
    (LATERALITY_QUALIFIER, crate::types::Role::Laterality),
    (CONTRAST_QUALIFIER, crate::types::Role::Contrast),
];
