use crate::constants::{BILATERAL, LEFT, RIGHT, WITHOUT_CONTRAST, WITH_CONTRAST};
use crate::error::RrsError;
use std::fmt;
use std::str::FromStr;

/// Sentinel value for unknown enums
pub const UNKNOWN: i32 = -1;

/// Semantic role of a defining relationship on a radiology procedure
///
/// The role index doubles as the processing priority: relationships are
/// sorted ascending by index before classification so that the procedure
/// is known before any site is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Procedure,
    Site,
    Laterality,
    Contrast,
    Unknown,
}

impl Role {
    /// Returns the role index (0..3), or [`UNKNOWN`] for unmatched qualifiers
    pub fn index(&self) -> i32 {
        match self {
            Role::Procedure => 0,
            Role::Site => 1,
            Role::Laterality => 2,
            Role::Contrast => 3,
            Role::Unknown => UNKNOWN,
        }
    }

    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            Role::Procedure => "procedure",
            Role::Site => "site",
            Role::Laterality => "laterality",
            Role::Contrast => "contrast",
            Role::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Anatomical sidedness of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Laterality {
    #[default]
    None,
    Left,
    Right,
    Bilateral,
}

impl Laterality {
    /// Derives laterality from membership in the left and right body structure sets
    ///
    /// Membership in both sets means the structure is bilateral.
    pub fn from_membership(in_left: bool, in_right: bool) -> Self {
        match (in_left, in_right) {
            (true, true) => Laterality::Bilateral,
            (true, false) => Laterality::Left,
            (false, true) => Laterality::Right,
            (false, false) => Laterality::None,
        }
    }

    /// Returns whether a side was detected
    pub fn is_none(&self) -> bool {
        matches!(self, Laterality::None)
    }

    /// Returns the SNOMED CT qualifier value, empty for no laterality
    pub fn code(&self) -> &'static str {
        match self {
            Laterality::None => "",
            Laterality::Left => LEFT,
            Laterality::Right => RIGHT,
            Laterality::Bilateral => BILATERAL,
        }
    }

    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            Laterality::None => "none",
            Laterality::Left => "left",
            Laterality::Right => "right",
            Laterality::Bilateral => "bilateral",
        }
    }
}

impl fmt::Display for Laterality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Contrast usage of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Contrast {
    #[default]
    Unspecified,
    WithContrast,
    WithoutContrast,
}

impl Contrast {
    /// Returns the SNOMED CT qualifier value, empty when unspecified
    pub fn code(&self) -> &'static str {
        match self {
            Contrast::Unspecified => "",
            Contrast::WithContrast => WITH_CONTRAST,
            Contrast::WithoutContrast => WITHOUT_CONTRAST,
        }
    }

    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            Contrast::Unspecified => "unspecified",
            Contrast::WithContrast => "with contrast",
            Contrast::WithoutContrast => "without contrast",
        }
    }
}

impl fmt::Display for Contrast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Body side used to build a laterality index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Returns the laterality qualifier value for this side
    pub fn concept(&self) -> &'static str {
        match self {
            Side::Left => LEFT,
            Side::Right => RIGHT,
        }
    }

    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl FromStr for Side {
    type Err = RrsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            _ => Err(RrsError::InvalidSide(s.to_string())),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}
