use crate::error::Result;
use crate::terminology::{ecl, TerminologyService};
use crate::types::{Concept, Contrast, Laterality};
use log::info;
use std::collections::HashSet;

/// Procedure sets whose membership overrides relationship-derived facets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideSets {
    bilateral_procedures: HashSet<Concept>,
    contrast_free_procedures: HashSet<Concept>,
}

impl OverrideSets {
    pub fn new(
        bilateral_procedures: HashSet<Concept>,
        contrast_free_procedures: HashSet<Concept>,
    ) -> Self {
        Self {
            bilateral_procedures,
            contrast_free_procedures,
        }
    }

    /// Builds both sets with one ECL query each
    pub fn build<S: TerminologyService>(service: &S) -> Result<Self> {
        let bilateral: HashSet<Concept> = service
            .expand_value_set(&ecl::bilateral_procedures())?
            .into_iter()
            .collect();
        info!("Bilateral procedures: {}", bilateral.len());

        let contrast_free: HashSet<Concept> = service
            .expand_value_set(&ecl::contrast_free_procedures())?
            .into_iter()
            .collect();
        info!("Procedures without contrast: {}", contrast_free.len());

        Ok(Self::new(bilateral, contrast_free))
    }

    pub fn is_bilateral(&self, procedure: &str) -> bool {
        self.bilateral_procedures.contains(procedure)
    }

    pub fn is_contrast_free(&self, procedure: &str) -> bool {
        self.contrast_free_procedures.contains(procedure)
    }

    /// Procedure-level bilaterality takes precedence over site-derived laterality
    pub fn apply_bilateral_override(&self, procedure: &str, laterality: Laterality) -> Laterality {
        if self.is_bilateral(procedure) {
            Laterality::Bilateral
        } else {
            laterality
        }
    }

    /// A "without contrast" procedure is never reported with contrast
    pub fn apply_contrast_override(&self, procedure: &str, contrast: Contrast) -> Contrast {
        if self.is_contrast_free(procedure) {
            Contrast::WithoutContrast
        } else {
            contrast
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminology::StaticTerminology;
    use rstest::rstest;

    const BILATERAL_MAMMOGRAM: &str = "241055006";
    const CT_HEAD_NO_CONTRAST: &str = "396205005";

    fn sets() -> OverrideSets {
        OverrideSets::new(
            [Concept::from(BILATERAL_MAMMOGRAM)].into_iter().collect(),
            [Concept::from(CT_HEAD_NO_CONTRAST)].into_iter().collect(),
        )
    }

    #[rstest]
    #[case(Laterality::None)]
    #[case(Laterality::Left)]
    #[case(Laterality::Right)]
    fn test_bilateral_override_wins(#[case] site_laterality: Laterality) {
        assert_eq!(
            sets().apply_bilateral_override(BILATERAL_MAMMOGRAM, site_laterality),
            Laterality::Bilateral
        );
    }

    #[test]
    fn test_bilateral_override_passthrough() {
        assert_eq!(
            sets().apply_bilateral_override(CT_HEAD_NO_CONTRAST, Laterality::Left),
            Laterality::Left
        );
    }

    #[rstest]
    #[case(Contrast::Unspecified)]
    #[case(Contrast::WithContrast)]
    fn test_contrast_override_wins(#[case] detected: Contrast) {
        assert_eq!(
            sets().apply_contrast_override(CT_HEAD_NO_CONTRAST, detected),
            Contrast::WithoutContrast
        );
    }

    #[test]
    fn test_contrast_override_passthrough() {
        assert_eq!(
            sets().apply_contrast_override(BILATERAL_MAMMOGRAM, Contrast::WithContrast),
            Contrast::WithContrast
        );
    }

    #[test]
    fn test_build() {
        let service = StaticTerminology::new()
            .with_expansion(&ecl::bilateral_procedures(), &[BILATERAL_MAMMOGRAM])
            .with_expansion(&ecl::contrast_free_procedures(), &[CT_HEAD_NO_CONTRAST]);
        let sets = OverrideSets::build(&service).unwrap();
        assert!(sets.is_bilateral(BILATERAL_MAMMOGRAM));
        assert!(!sets.is_bilateral(CT_HEAD_NO_CONTRAST));
        assert!(sets.is_contrast_free(CT_HEAD_NO_CONTRAST));
        assert_eq!(service.queries().len(), 2);
    }
}
