//! Expression Constraint Language queries issued by the engine
//!
//! Every query the classifier sends to the terminology service is built here
//! from the named concept table, so the exact ECL text lives in one place.

use crate::constants::{
    BODY_STRUCTURE_ROOT, LATERALITY_QUALIFIER, LEFT, RADIOLOGY_PROCEDURE_ROOT, RIGHT,
    SITE_QUALIFIER,
};
use crate::types::Side;

/// Body structures qualified with the given laterality
pub fn lateralized_structures(side: Side) -> String {
    format!(
        "<{}:{}={}",
        BODY_STRUCTURE_ROOT,
        LATERALITY_QUALIFIER,
        side.concept()
    )
}

/// Procedures with both a right-sided and a left-sided site
pub fn bilateral_procedures() -> String {
    format!(
        "< {root} : {site} = (*: {lat}= ({right})), {site} = (*: {lat}= ({left}))",
        root = RADIOLOGY_PROCEDURE_ROOT,
        site = SITE_QUALIFIER,
        lat = LATERALITY_QUALIFIER,
        right = RIGHT,
        left = LEFT,
    )
}

/// Procedures whose description states "without contrast"
pub fn contrast_free_procedures() -> String {
    format!(
        "< {} {{{{ term = \"without contrast\" }}}}",
        RADIOLOGY_PROCEDURE_ROOT
    )
}

/// Nearest primitive parents of a concept
pub fn proximal_primitive_parent(code: &str) -> String {
    format!(">! {} {{{{ C definitionStatus = primitive }}}}", code)
}

/// The concept and all of its supertypes
pub fn ancestors_or_self(code: &str) -> String {
    format!(">> {}", code)
}

/// Implicit ValueSet URL for an ECL expression in a code system
pub fn value_set_url(system: &str, ecl: &str) -> String {
    format!("{}?fhir_vs=ecl/{}", system, ecl)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lateralized_structures() {
        assert_eq!(
            lateralized_structures(Side::Left),
            "<123037004:272741003=7771000"
        );
        assert_eq!(
            lateralized_structures(Side::Right),
            "<123037004:272741003=24028007"
        );
    }

    #[test]
    fn test_bilateral_procedures() {
        assert_eq!(
            bilateral_procedures(),
            "< 71388002 : 405813007 = (*: 272741003= (24028007)), 405813007 = (*: 272741003= (7771000))"
        );
    }

    #[test]
    fn test_contrast_free_procedures() {
        assert_eq!(
            contrast_free_procedures(),
            "< 71388002 {{ term = \"without contrast\" }}"
        );
    }

    #[test]
    fn test_proximal_primitive_parent() {
        assert_eq!(
            proximal_primitive_parent("818983003"),
            ">! 818983003 {{ C definitionStatus = primitive }}"
        );
    }

    #[test]
    fn test_ancestors_or_self() {
        assert_eq!(ancestors_or_self("169069000"), ">> 169069000");
    }

    #[test]
    fn test_value_set_url() {
        assert_eq!(
            value_set_url("http://snomed.info/sct", ">> 169069000"),
            "http://snomed.info/sct?fhir_vs=ecl/>> 169069000"
        );
    }
}
