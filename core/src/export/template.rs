use crate::error::{Result, RrsError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Descriptive metadata copied from a template into an exported resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ResourceMetadata {
    /// Loads metadata from a FHIR resource template; other template fields are ignored
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            RrsError::Template(format!("cannot read {}: {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    fn draft(name: &str, title: &str, description: &str) -> Self {
        Self {
            url: None,
            version: None,
            name: Some(name.to_string()),
            title: Some(title.to_string()),
            status: Some("draft".to_string()),
            publisher: None,
            description: Some(description.to_string()),
        }
    }
}

/// Exported artifact, with its template and output file names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Services,
    Procedures,
    BodyStructures,
    Lateralities,
    ServiceMap,
}

impl Artifact {
    /// ValueSet artifacts in classified-file column order
    pub const VALUE_SETS: [Artifact; 4] = [
        Artifact::Services,
        Artifact::Procedures,
        Artifact::BodyStructures,
        Artifact::Lateralities,
    ];

    pub fn template_file(&self) -> &'static str {
        match self {
            Artifact::Services => "ValueSet-radiology-services-template.json",
            Artifact::Procedures => "ValueSet-radiology-procedure-template.json",
            Artifact::BodyStructures => "ValueSet-radiology-body-structure-template.json",
            Artifact::Lateralities => "ValueSet-radiology-laterality-template.json",
            Artifact::ServiceMap => "ConceptMap-radiology-services-template.json",
        }
    }

    pub fn output_file(&self) -> &'static str {
        match self {
            Artifact::Services => "service.json",
            Artifact::Procedures => "procedure.json",
            Artifact::BodyStructures => "bodysite.json",
            Artifact::Lateralities => "laterality.json",
            Artifact::ServiceMap => "conceptmap.json",
        }
    }

    /// Classified-file column a ValueSet is built from
    pub fn column(&self) -> Option<usize> {
        match self {
            Artifact::Services => Some(0),
            Artifact::Procedures => Some(1),
            Artifact::BodyStructures => Some(2),
            Artifact::Lateralities => Some(3),
            Artifact::ServiceMap => None,
        }
    }

    pub fn default_metadata(&self) -> ResourceMetadata {
        match self {
            Artifact::Services => ResourceMetadata::draft(
                "RadiologyServices",
                "Radiology Services",
                "Radiology order codes classified against SNOMED CT",
            ),
            Artifact::Procedures => ResourceMetadata::draft(
                "RadiologyProcedures",
                "Radiology Procedures",
                "Focus procedures and modalities radiology orders map to",
            ),
            Artifact::BodyStructures => ResourceMetadata::draft(
                "RadiologyBodyStructures",
                "Radiology Body Structures",
                "De-lateralized body sites of radiology orders",
            ),
            Artifact::Lateralities => ResourceMetadata::draft(
                "RadiologyLateralities",
                "Radiology Lateralities",
                "Lateralities of radiology orders",
            ),
            Artifact::ServiceMap => ResourceMetadata::draft(
                "RadiologyServiceMap",
                "Radiology Service Map",
                "Maps focus procedure and qualifiers to radiology order codes",
            ),
        }
    }

    /// Metadata from the template directory, or built-in defaults without one
    pub fn metadata(&self, templates: Option<&Path>) -> Result<ResourceMetadata> {
        match templates {
            Some(dir) => ResourceMetadata::from_file(&dir.join(self.template_file())),
            None => Ok(self.default_metadata()),
        }
    }
}
