use crate::constants::{DEFAULT_TERMINOLOGY_URL, SNOMED_CT_SYSTEM};
use std::path::PathBuf;
use std::time::Duration;

/// Default HTTP timeout for terminology requests
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default number of codes requested per expansion page
pub const DEFAULT_PAGE_SIZE: usize = 10_000;

/// Configuration for a classification run
///
/// # Example
///
/// ```
/// use rrscat_core::PipelineConfig;
/// use std::time::Duration;
///
/// let config = PipelineConfig::default()
///     .with_server_url("http://localhost:8080/fhir/")
///     .with_timeout(Duration::from_secs(5))
///     .with_page_size(0);
///
/// assert_eq!(config.server_url, "http://localhost:8080/fhir");
/// assert_eq!(config.page_size, None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Base URL of the FHIR terminology server (no trailing slash)
    pub server_url: String,

    /// Code system the order codes belong to
    pub system: String,

    /// HTTP request timeout
    pub timeout: Duration,

    /// Codes per expansion page. None requests the whole expansion at once.
    pub page_size: Option<usize>,

    /// Path of the focus procedure list
    pub procedures_file: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_TERMINOLOGY_URL.to_string(),
            system: SNOMED_CT_SYSTEM.to_string(),
            timeout: DEFAULT_TIMEOUT,
            page_size: Some(DEFAULT_PAGE_SIZE),
            procedures_file: PathBuf::from("procedures.txt"),
        }
    }
}

impl PipelineConfig {
    /// Builder: Set the terminology server base URL
    pub fn with_server_url(mut self, url: &str) -> Self {
        self.server_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Builder: Set the code system URI
    pub fn with_system(mut self, system: &str) -> Self {
        self.system = system.to_string();
        self
    }

    /// Builder: Set the HTTP timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder: Set the expansion page size, `0` disables paging
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = (page_size > 0).then_some(page_size);
        self
    }

    /// Builder: Set the focus procedure list path
    pub fn with_procedures_file(mut self, path: PathBuf) -> Self {
        self.procedures_file = path;
        self
    }
}
