use super::{Concept, Contrast, Laterality};

/// Normalized four-facet description of one radiology order code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedOrder {
    /// Order code taken from the input map
    pub source_code: Concept,

    /// Focus procedure the order maps to
    pub base_procedure: Concept,

    /// De-lateralized body site, empty when no site relationship exists
    pub body_site: Concept,

    pub laterality: Laterality,

    pub contrast: Contrast,
}

impl ClassifiedOrder {
    /// Column values in output order: Service, Procedure, Site, Laterality, Contrast
    pub fn columns(&self) -> [&str; 5] {
        [
            self.source_code.as_str(),
            self.base_procedure.as_str(),
            self.body_site.as_str(),
            self.laterality.code(),
            self.contrast.code(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns() {
        let order = ClassifiedOrder {
            source_code: Concept::from("169069000"),
            base_procedure: Concept::from("77477000"),
            body_site: Concept::from("818983003"),
            laterality: Laterality::Left,
            contrast: Contrast::Unspecified,
        };
        assert_eq!(
            order.columns(),
            ["169069000", "77477000", "818983003", "7771000", ""]
        );
    }
}
