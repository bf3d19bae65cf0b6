use super::ecl::value_set_url;
use super::fhir::{CapabilityStatement, Expansion, Parameters, ValueSetExpansionResponse};
use super::TerminologyService;
use crate::constants::FHIR_JSON;
use crate::error::{Result, RrsError};
use crate::types::{Concept, PipelineConfig};
use log::debug;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;

/// Blocking HTTP client for a FHIR terminology server
///
/// Requests are issued one at a time; the configured timeout applies to each.
pub struct FhirTerminologyClient {
    client: Client,
    base_url: String,
    system: String,
    page_size: Option<usize>,
}

impl FhirTerminologyClient {
    /// Creates a client from the run configuration
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.server_url.trim_end_matches('/').to_string(),
            system: config.system.clone(),
            page_size: config.page_size,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn metadata_url(&self) -> String {
        format!("{}/metadata", self.base_url)
    }

    fn expand_url(&self, ecl: &str, offset: usize) -> String {
        let mut url = format!(
            "{}/ValueSet/$expand?url={}",
            self.base_url,
            urlencoding::encode(&value_set_url(&self.system, ecl))
        );
        if let Some(count) = self.page_size {
            url.push_str(&format!("&count={}&offset={}", count, offset));
        }
        url
    }

    fn lookup_url(&self, code: &str, system: &str) -> String {
        format!(
            "{}/CodeSystem/$lookup?system={}&code={}&property=*",
            self.base_url,
            urlencoding::encode(system),
            urlencoding::encode(code)
        )
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header(ACCEPT, FHIR_JSON)
            .send()?
            .error_for_status()?;
        Ok(response.json()?)
    }
}

impl TerminologyService for FhirTerminologyClient {
    fn check_health(&self) -> Result<bool> {
        let statement: CapabilityStatement = self.get_json(&self.metadata_url())?;
        Ok(statement.is_active())
    }

    fn expand_value_set(&self, ecl: &str) -> Result<Vec<Concept>> {
        let mut codes: Vec<Concept> = Vec::new();
        let mut offset = 0;
        loop {
            let response: ValueSetExpansionResponse =
                self.get_json(&self.expand_url(ecl, offset))?;
            let expansion = response.expansion.ok_or_else(|| {
                RrsError::MalformedResponse(format!(
                    "{} without expansion for ECL '{}'",
                    response.resource_type.as_deref().unwrap_or("resource"),
                    ecl
                ))
            })?;

            codes.extend(expansion.codes().into_iter().map(Concept::from));

            match self.page_size.and(next_page_offset(offset, &expansion)) {
                Some(next) => {
                    debug!(
                        "Expanded {} codes for '{}', next offset {}",
                        codes.len(),
                        ecl,
                        next
                    );
                    offset = next;
                }
                None => break,
            }
        }
        Ok(codes)
    }

    fn lookup_properties(&self, concept: &Concept, system: &str) -> Result<Parameters> {
        self.get_json(&self.lookup_url(concept.as_str(), system))
    }
}

/// Offset of the next expansion page, if one remains
///
/// Server offsets and totals count top-level entries only; nested
/// `contains` arrive with their parent.
fn next_page_offset(offset: usize, expansion: &Expansion) -> Option<usize> {
    let fetched = expansion.contains.len();
    let next = offset + fetched;
    match expansion.total {
        Some(total) if fetched > 0 && next < total => Some(next),
        _ => None,
    }
}
