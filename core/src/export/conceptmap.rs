use super::template::ResourceMetadata;
use crate::constants::{
    BODY_STRUCTURE_ROOT, CONTRAST_QUALIFIER, LATERALITY_QUALIFIER, SNOMED_CT_SYSTEM,
};
use crate::pipeline::ClassifiedRow;
use crate::types::is_sctid;
use serde::Serialize;

/// FHIR R4 `ConceptMap` from focus procedure (plus qualifiers) to order code
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptMap {
    pub resource_type: &'static str,
    #[serde(flatten)]
    pub metadata: ResourceMetadata,
    pub group: Vec<ConceptMapGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConceptMapGroup {
    pub source: String,
    pub target: String,
    pub element: Vec<ConceptMapElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConceptMapElement {
    pub code: String,
    pub target: Vec<ConceptMapTarget>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptMapTarget {
    pub code: String,
    pub equivalence: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<DependsOn>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DependsOn {
    pub property: &'static str,
    pub system: &'static str,
    pub value: String,
}

/// Qualifier columns carried as `dependsOn`, with the property each maps to
const DEPENDS_ON_COLUMNS: [(usize, &str); 3] = [
    (2, BODY_STRUCTURE_ROOT),
    (3, LATERALITY_QUALIFIER),
    (4, CONTRAST_QUALIFIER),
];

fn element_for(row: &ClassifiedRow) -> Option<ConceptMapElement> {
    let service = row.service.trim();
    if !is_sctid(service) {
        return None;
    }

    let depends_on = DEPENDS_ON_COLUMNS
        .iter()
        .filter_map(|(column, property)| {
            let value = row.column(*column)?.trim();
            is_sctid(value).then(|| DependsOn {
                property: *property,
                system: SNOMED_CT_SYSTEM,
                value: value.to_string(),
            })
        })
        .collect();

    Some(ConceptMapElement {
        code: row.procedure.trim().to_string(),
        target: vec![ConceptMapTarget {
            code: service.to_string(),
            equivalence: "equivalent",
            depends_on,
        }],
    })
}

/// Builds a ConceptMap with one element per classified row
pub fn build_concept_map(rows: &[ClassifiedRow], metadata: ResourceMetadata) -> ConceptMap {
    ConceptMap {
        resource_type: "ConceptMap",
        metadata,
        group: vec![ConceptMapGroup {
            source: SNOMED_CT_SYSTEM.to_string(),
            target: SNOMED_CT_SYSTEM.to_string(),
            element: rows.iter().filter_map(element_for).collect(),
        }],
    }
}
