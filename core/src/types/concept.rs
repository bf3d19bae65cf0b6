use regex::Regex;
use std::borrow::Borrow;
use std::fmt;
use std::sync::OnceLock;

/// Opaque identifier in the SNOMED CT code space
///
/// No structure is assumed beyond string equality; `Borrow<str>` lets
/// concept sets be queried with plain string slices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Concept(String);

impl Concept {
    /// Creates a concept from its canonical string form (surrounding whitespace removed)
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into();
        let trimmed = code.trim();
        if trimmed.len() == code.len() {
            Self(code)
        } else {
            Self(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks whether the identifier looks like a SNOMED CT identifier
    ///
    /// SCTIDs are 6 to 18 digits without a leading zero.
    pub fn is_sctid(&self) -> bool {
        is_sctid(&self.0)
    }
}

/// Checks whether a string looks like a SNOMED CT identifier
pub fn is_sctid(s: &str) -> bool {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = REGEX
        .get_or_init(|| Regex::new(r"^[1-9][0-9]{5,17}$").expect("Failed to compile regex"));
    regex.is_match(s)
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for Concept {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Concept {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Concept {
    fn from(s: &str) -> Self {
        Concept::new(s)
    }
}

impl From<String> for Concept {
    fn from(s: String) -> Self {
        Concept::new(s)
    }
}
