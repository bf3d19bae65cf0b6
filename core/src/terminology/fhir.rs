//! Minimal FHIR R4 wire models for the terminology operations the engine calls

use serde::{Deserialize, Serialize};

/// `CapabilityStatement` returned by `GET /metadata`, reduced to its status
#[derive(Debug, Clone, Deserialize)]
pub struct CapabilityStatement {
    pub status: Option<String>,
}

impl CapabilityStatement {
    pub fn is_active(&self) -> bool {
        self.status.as_deref() == Some("active")
    }
}

/// `ValueSet` returned by `$expand`, reduced to its expansion
#[derive(Debug, Clone, Deserialize)]
pub struct ValueSetExpansionResponse {
    #[serde(rename = "resourceType")]
    pub resource_type: Option<String>,
    pub expansion: Option<Expansion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Expansion {
    pub total: Option<usize>,
    #[serde(default)]
    pub contains: Vec<ExpansionContains>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExpansionContains {
    pub code: Option<String>,
    #[serde(default)]
    pub contains: Vec<ExpansionContains>,
}

impl Expansion {
    /// Collects codes depth-first, flattening hierarchical expansions
    pub fn codes(&self) -> Vec<String> {
        fn walk(entries: &[ExpansionContains], out: &mut Vec<String>) {
            for entry in entries {
                if let Some(code) = &entry.code {
                    out.push(code.clone());
                }
                walk(&entry.contains, out);
            }
        }

        let mut out = Vec::new();
        walk(&self.contains, &mut out);
        out
    }
}

/// `Parameters` resource returned by `CodeSystem/$lookup`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    #[serde(default)]
    pub parameter: Vec<ParameterPart>,
}

/// A named parameter or nested part
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterPart {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub part: Vec<ParameterPart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_coding: Option<Coding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_string: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coding {
    pub system: Option<String>,
    pub code: Option<String>,
}

impl ParameterPart {
    fn coded(name: &str, code: &str) -> Self {
        Self {
            name: name.to_string(),
            value_code: Some(code.to_string()),
            ..Default::default()
        }
    }

    /// Returns the part value as a code, whichever value[x] carries it
    pub fn code_value(&self) -> Option<&str> {
        self.value_code
            .as_deref()
            .or_else(|| self.value_coding.as_ref().and_then(|c| c.code.as_deref()))
            .or(self.value_string.as_deref())
    }
}

impl Parameters {
    /// Builds a lookup response carrying one role-group property per
    /// `(qualifier, value)` pair, the shape SNOMED CT servers return
    pub fn from_defining_relationships(pairs: &[(&str, &str)]) -> Self {
        let parameter = pairs
            .iter()
            .map(|(qualifier, value)| ParameterPart {
                name: "property".to_string(),
                part: vec![
                    ParameterPart::coded("code", "609096000"),
                    ParameterPart {
                        name: "subproperty".to_string(),
                        part: vec![
                            ParameterPart::coded("code", qualifier),
                            ParameterPart::coded("value", value),
                        ],
                        ..Default::default()
                    },
                ],
                ..Default::default()
            })
            .collect();
        Self { parameter }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_statement_status() {
        let active: CapabilityStatement =
            serde_json::from_str(r#"{"resourceType":"CapabilityStatement","status":"active"}"#)
                .unwrap();
        assert!(active.is_active());

        let draft: CapabilityStatement = serde_json::from_str(r#"{"status":"draft"}"#).unwrap();
        assert!(!draft.is_active());
    }

    #[test]
    fn test_expansion_codes_flattens_nested() {
        let json = r#"{
            "resourceType": "ValueSet",
            "expansion": {
                "total": 3,
                "contains": [
                    {"system": "http://snomed.info/sct", "code": "1"},
                    {"code": "2", "contains": [{"code": "3"}]}
                ]
            }
        }"#;
        let vs: ValueSetExpansionResponse = serde_json::from_str(json).unwrap();
        let expansion = vs.expansion.unwrap();
        assert_eq!(expansion.total, Some(3));
        assert_eq!(expansion.codes(), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_empty_expansion_without_contains() {
        let json = r#"{"resourceType":"ValueSet","expansion":{"total":0}}"#;
        let vs: ValueSetExpansionResponse = serde_json::from_str(json).unwrap();
        assert!(vs.expansion.unwrap().codes().is_empty());
    }

    #[test]
    fn test_code_value_variants() {
        let part: ParameterPart = serde_json::from_str(
            r#"{"name":"value","valueCoding":{"system":"http://snomed.info/sct","code":"77477000"}}"#,
        )
        .unwrap();
        assert_eq!(part.code_value(), Some("77477000"));

        let part: ParameterPart =
            serde_json::from_str(r#"{"name":"value","valueString":"abc"}"#).unwrap();
        assert_eq!(part.code_value(), Some("abc"));
    }
}
