use crate::error::Result;
use crate::terminology::{ecl, TerminologyService};
use crate::types::{Concept, Laterality, Side};
use log::{info, warn};
use std::collections::HashSet;

/// Left- and right-qualified body structures, built once per run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LateralityIndex {
    left: HashSet<Concept>,
    right: HashSet<Concept>,
}

impl LateralityIndex {
    pub fn new(left: HashSet<Concept>, right: HashSet<Concept>) -> Self {
        Self { left, right }
    }

    /// Builds both sides from the terminology service
    pub fn build<S: TerminologyService>(service: &S) -> Result<Self> {
        info!("Get left sided body structures");
        let left = fetch_lateralized_structures(service, "left")?;
        info!("Get right sided body structures");
        let right = fetch_lateralized_structures(service, "right")?;

        let index = Self::new(left, right);
        info!(
            "Laterality index: {} left, {} right, {} in both",
            index.left.len(),
            index.right.len(),
            index.overlap_count()
        );
        Ok(index)
    }

    /// Number of structures present in both sets
    pub fn overlap_count(&self) -> usize {
        self.left.intersection(&self.right).count()
    }

    /// Laterality of a body structure by set membership alone
    pub fn laterality_of(&self, site: &str) -> Laterality {
        Laterality::from_membership(self.left.contains(site), self.right.contains(site))
    }

    pub fn left(&self) -> &HashSet<Concept> {
        &self.left
    }

    pub fn right(&self) -> &HashSet<Concept> {
        &self.right
    }
}

/// Fetches all body structures qualified with the named side
///
/// # Errors
///
/// Returns [`crate::RrsError::InvalidSide`] unless `side` is "left" or
/// "right"; no query is issued in that case.
pub fn fetch_lateralized_structures<S: TerminologyService>(
    service: &S,
    side: &str,
) -> Result<HashSet<Concept>> {
    let side: Side = side.parse()?;
    let codes = service.expand_value_set(&ecl::lateralized_structures(side))?;
    Ok(codes.into_iter().collect())
}

/// Resolves laterality and the de-lateralized site of a body structure
///
/// # Algorithm
///
/// 1. Classify the site by membership in the left/right sets (both → bilateral)
/// 2. If no side was detected, return the site unchanged without any query
/// 3. Otherwise query the proximal primitive parent and use the first result
/// 4. Fall back to the original site when that query is empty
pub fn resolve_laterality<S: TerminologyService>(
    service: &S,
    site: &Concept,
    index: &LateralityIndex,
) -> Result<(Laterality, Concept)> {
    let laterality = index.laterality_of(site.as_str());
    if laterality.is_none() {
        return Ok((laterality, site.clone()));
    }

    let parents = service.expand_value_set(&ecl::proximal_primitive_parent(site.as_str()))?;
    match parents.into_iter().next() {
        Some(parent) => Ok((laterality, parent)),
        None => {
            warn!(
                "No proximal primitive parent for {} site {}, keeping lateralized site",
                laterality, site
            );
            Ok((laterality, site.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RrsError;
    use crate::terminology::StaticTerminology;
    use rstest::rstest;

    const LEFT_KIDNEY: &str = "18639004";
    const RIGHT_KIDNEY: &str = "9846003";
    const BOTH_BREASTS: &str = "63762007";
    const ABDOMEN: &str = "818983003";

    fn set(codes: &[&str]) -> HashSet<Concept> {
        codes.iter().map(|c| Concept::from(*c)).collect()
    }

    fn index() -> LateralityIndex {
        LateralityIndex::new(
            set(&[LEFT_KIDNEY, BOTH_BREASTS]),
            set(&[RIGHT_KIDNEY, BOTH_BREASTS]),
        )
    }

    fn service() -> StaticTerminology {
        StaticTerminology::new()
            .with_expansion(&ecl::proximal_primitive_parent(LEFT_KIDNEY), &["64033007"])
            .with_expansion(&ecl::proximal_primitive_parent(RIGHT_KIDNEY), &["64033007"])
            .with_expansion(&ecl::proximal_primitive_parent(BOTH_BREASTS), &["76752008"])
    }

    #[rstest]
    #[case(LEFT_KIDNEY, Laterality::Left, "64033007")]
    #[case(RIGHT_KIDNEY, Laterality::Right, "64033007")]
    #[case(BOTH_BREASTS, Laterality::Bilateral, "76752008")]
    #[case(ABDOMEN, Laterality::None, ABDOMEN)]
    fn test_resolve_laterality(
        #[case] site: &str,
        #[case] expected: Laterality,
        #[case] normalized: &str,
    ) {
        let (laterality, resolved) =
            resolve_laterality(&service(), &Concept::from(site), &index()).unwrap();
        assert_eq!(laterality, expected);
        assert_eq!(resolved.as_str(), normalized);
    }

    #[test]
    fn test_no_parent_query_without_laterality() {
        let service = service();
        resolve_laterality(&service, &Concept::from(ABDOMEN), &index()).unwrap();
        assert!(service.queries().is_empty());
    }

    #[test]
    fn test_empty_parent_falls_back_to_site() {
        let service = StaticTerminology::new();
        let (laterality, resolved) =
            resolve_laterality(&service, &Concept::from(LEFT_KIDNEY), &index()).unwrap();
        assert_eq!(laterality, Laterality::Left);
        assert_eq!(resolved.as_str(), LEFT_KIDNEY);
        assert_eq!(service.queries().len(), 1);
    }

    #[test]
    fn test_overlap_count() {
        assert_eq!(index().overlap_count(), 1);
    }

    #[test]
    fn test_build_index() {
        let service = StaticTerminology::new()
            .with_expansion("<123037004:272741003=7771000", &[LEFT_KIDNEY])
            .with_expansion("<123037004:272741003=24028007", &[RIGHT_KIDNEY]);
        let index = LateralityIndex::build(&service).unwrap();
        assert_eq!(index.laterality_of(LEFT_KIDNEY), Laterality::Left);
        assert_eq!(index.laterality_of(RIGHT_KIDNEY), Laterality::Right);
        assert_eq!(index.overlap_count(), 0);
    }

    #[test]
    fn test_fetch_invalid_side() {
        let service = StaticTerminology::new();
        let err = fetch_lateralized_structures(&service, "both").unwrap_err();
        assert!(matches!(err, RrsError::InvalidSide(_)));
        assert!(service.queries().is_empty());
    }
}
