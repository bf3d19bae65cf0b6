use super::template::ResourceMetadata;
use crate::constants::SNOMED_CT_SYSTEM;
use crate::pipeline::ClassifiedRow;
use crate::types::is_sctid;
use serde::Serialize;
use std::collections::HashSet;

/// FHIR R4 `ValueSet` with a single enumerated SNOMED CT include
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueSet {
    pub resource_type: &'static str,
    #[serde(flatten)]
    pub metadata: ResourceMetadata,
    pub compose: Compose,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Compose {
    pub include: Vec<ComposeInclude>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposeInclude {
    pub system: String,
    pub concept: Vec<ComposeConcept>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposeConcept {
    pub code: String,
}

/// Distinct identifiers of one column, in first-seen order
///
/// Empty cells and values that are not SNOMED CT identifiers are skipped.
pub fn distinct_column(rows: &[ClassifiedRow], column: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    rows.iter()
        .filter_map(|row| row.column(column))
        .map(str::trim)
        .filter(|code| is_sctid(code))
        .filter(|code| seen.insert(code.to_string()))
        .map(str::to_string)
        .collect()
}

/// Builds a ValueSet enumerating the distinct codes of one column
pub fn build_value_set(
    rows: &[ClassifiedRow],
    column: usize,
    metadata: ResourceMetadata,
) -> ValueSet {
    let concept = distinct_column(rows, column)
        .into_iter()
        .map(|code| ComposeConcept { code })
        .collect();

    ValueSet {
        resource_type: "ValueSet",
        metadata,
        compose: Compose {
            include: vec![ComposeInclude {
                system: SNOMED_CT_SYSTEM.to_string(),
                concept,
            }],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(service: &str, procedure: &str, site: &str, laterality: &str) -> ClassifiedRow {
        ClassifiedRow {
            service: service.into(),
            procedure: procedure.into(),
            site: site.into(),
            laterality: laterality.into(),
            contrast: String::new(),
        }
    }

    fn rows() -> Vec<ClassifiedRow> {
        vec![
            row("169069000", "77477000", "818983003", "7771000"),
            row("241055006", "71651007", "76752008", "51440002"),
            row("399208008", "77477000", "", ""),
        ]
    }

    #[test]
    fn test_distinct_column_first_seen_order() {
        assert_eq!(
            distinct_column(&rows(), 1),
            vec!["77477000".to_string(), "71651007".to_string()]
        );
    }

    #[test]
    fn test_distinct_column_skips_empty() {
        assert_eq!(distinct_column(&rows(), 3).len(), 2);
    }

    #[test]
    fn test_value_set_json_shape() {
        let meta = ResourceMetadata {
            name: Some("RadiologyServices".into()),
            status: Some("draft".into()),
            ..Default::default()
        };
        let vs = build_value_set(&rows(), 0, meta);
        let json = serde_json::to_value(&vs).unwrap();

        assert_eq!(json["resourceType"], "ValueSet");
        assert_eq!(json["name"], "RadiologyServices");
        assert!(json.get("url").is_none());
        assert_eq!(json["compose"]["include"][0]["system"], "http://snomed.info/sct");
        assert_eq!(
            json["compose"]["include"][0]["concept"][0],
            serde_json::json!({"code": "169069000"})
        );
        assert_eq!(
            json["compose"]["include"][0]["concept"]
                .as_array()
                .unwrap()
                .len(),
            3
        );
    }
}
