use super::{Concept, Role};
use crate::constants::QUALIFIER_ROLES;

/// Defining relationship of a concept, tagged with its semantic role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub role: Role,
    pub qualifier: Concept,
    pub target: Concept,
}

impl Relationship {
    /// Creates a relationship, resolving the role from the qualifier table
    pub fn new(qualifier: Concept, target: Concept) -> Self {
        Self {
            role: role_for_qualifier(qualifier.as_str()),
            qualifier,
            target,
        }
    }
}

/// Resolves the semantic role of a relationship type by exact match
///
/// Qualifiers outside the fixed table yield [`Role::Unknown`].
pub fn role_for_qualifier(qualifier: &str) -> Role {
    QUALIFIER_ROLES
        .iter()
        .find(|(code, _)| *code == qualifier)
        .map(|(_, role)| *role)
        .unwrap_or(Role::Unknown)
}

/// Sorts relationships ascending by role index
///
/// The sort is stable, so relationships of the same role keep the order
/// in which the terminology service returned them.
pub fn sort_by_role(relationships: &mut [Relationship]) {
    relationships.sort_by_key(|r| r.role.index());
}
