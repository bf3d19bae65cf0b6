use crate::error::Result;
use crate::terminology::fhir::Parameters;
use crate::terminology::TerminologyService;
use crate::types::{sort_by_role, Concept, Relationship};
use log::debug;

/// Retrieves the defining relationships of a concept, in the order returned
///
/// A concept without defining relationships yields an empty sequence.
pub fn classify<S: TerminologyService>(
    service: &S,
    concept: &Concept,
    system: &str,
) -> Result<Vec<Relationship>> {
    let parameters = service.lookup_properties(concept, system)?;
    let relationships = extract_relationships(&parameters);
    debug!(
        "{} has {} defining relationships",
        concept,
        relationships.len()
    );
    Ok(relationships)
}

/// Retrieves the defining relationships of a concept sorted by role index
///
/// This is the form the classifier consumes: the procedure relationship
/// is always seen before any site relationship.
pub fn classify_sorted<S: TerminologyService>(
    service: &S,
    concept: &Concept,
    system: &str,
) -> Result<Vec<Relationship>> {
    let mut relationships = classify(service, concept, system)?;
    sort_by_role(&mut relationships);
    Ok(relationships)
}

/// Walks a lookup response for qualifier/value pairs
///
/// Navigates: parameter[name=property] → part[name=subproperty] → parts.
/// A `code` part sets the current qualifier and each following `value`
/// part emits one relationship for it.
pub fn extract_relationships(parameters: &Parameters) -> Vec<Relationship> {
    let mut relationships = Vec::new();

    let subproperties = parameters
        .parameter
        .iter()
        .filter(|p| p.name == "property")
        .flat_map(|p| p.part.iter())
        .filter(|p| p.name == "subproperty");

    for subproperty in subproperties {
        let mut qualifier: Option<Concept> = None;
        for part in &subproperty.part {
            match (part.name.as_str(), part.code_value()) {
                ("code", Some(code)) => qualifier = Some(Concept::from(code)),
                ("value", Some(value)) => {
                    if let Some(q) = &qualifier {
                        relationships.push(Relationship::new(q.clone(), Concept::from(value)));
                    }
                }
                _ => {}
            }
        }
    }

    relationships
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminology::StaticTerminology;
    use crate::types::Role;

    const LOOKUP_RESPONSE: &str = r#"{
        "resourceType": "Parameters",
        "parameter": [
            {"name": "name", "valueString": "SNOMED CT"},
            {"name": "display", "valueString": "CT of abdomen"},
            {"name": "property", "part": [
                {"name": "code", "valueCode": "parent"},
                {"name": "value", "valueCode": "77477000"}
            ]},
            {"name": "property", "part": [
                {"name": "code", "valueCode": "609096000"},
                {"name": "subproperty", "part": [
                    {"name": "code", "valueCode": "405813007"},
                    {"name": "value", "valueCode": "818983003"}
                ]},
                {"name": "subproperty", "part": [
                    {"name": "code", "valueCode": "260686004"},
                    {"name": "value", "valueCode": "312251004"}
                ]}
            ]},
            {"name": "property", "part": [
                {"name": "code", "valueCode": "609096000"},
                {"name": "subproperty", "part": [
                    {"name": "code", "valueCode": "363703001"},
                    {"name": "value", "valueCode": "261004008"}
                ]}
            ]}
        ]
    }"#;

    #[test]
    fn test_extract_relationships_from_lookup() {
        let parameters: Parameters = serde_json::from_str(LOOKUP_RESPONSE).unwrap();
        let rels = extract_relationships(&parameters);

        assert_eq!(rels.len(), 3);
        assert_eq!(rels[0].role, Role::Site);
        assert_eq!(rels[0].target.as_str(), "818983003");
        assert_eq!(rels[1].role, Role::Procedure);
        assert_eq!(rels[1].target.as_str(), "312251004");
        assert_eq!(rels[2].role, Role::Unknown);
    }

    #[test]
    fn test_top_level_properties_ignored() {
        let parameters: Parameters = serde_json::from_str(LOOKUP_RESPONSE).unwrap();
        let rels = extract_relationships(&parameters);
        assert!(rels.iter().all(|r| r.target.as_str() != "77477000"));
    }

    #[test]
    fn test_value_without_qualifier_ignored() {
        let parameters: Parameters = serde_json::from_str(
            r#"{"parameter": [{"name": "property", "part": [
                {"name": "subproperty", "part": [{"name": "value", "valueCode": "1"}]}
            ]}]}"#,
        )
        .unwrap();
        assert!(extract_relationships(&parameters).is_empty());
    }

    #[test]
    fn test_classify_sorted_orders_by_role() {
        let service = StaticTerminology::new().with_relationships(
            "169069000",
            &[
                ("424361007", "385420005"),
                ("405813007", "818983003"),
                ("260686004", "312251004"),
            ],
        );
        let rels = classify_sorted(&service, &Concept::from("169069000"), "sct").unwrap();
        let roles: Vec<_> = rels.iter().map(|r| r.role).collect();
        assert_eq!(roles, vec![Role::Procedure, Role::Site, Role::Contrast]);
    }

    #[test]
    fn test_classify_no_relationships() {
        let service = StaticTerminology::new();
        let rels = classify(&service, &Concept::from("71388002"), "sct").unwrap();
        assert!(rels.is_empty());
    }
}
