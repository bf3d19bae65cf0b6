use crate::error::Result;
use crate::terminology::{ecl, TerminologyService};
use crate::types::{Concept, FocusProcedureList};
use std::collections::HashSet;

/// Maps a procedure onto the first focus procedure among its ancestors
///
/// Scans the focus list in order and returns the first entry that is the
/// procedure itself or one of its supertypes. When nothing matches, the
/// procedure is returned unchanged, which callers treat as unresolved.
///
/// # Example
///
/// ```
/// use rrscat_core::classification::map_procedure;
/// use rrscat_core::terminology::StaticTerminology;
/// use rrscat_core::{Concept, FocusProcedureList};
///
/// let service = StaticTerminology::new()
///     .with_expansion(">> 169069000", &["169069000", "77477000", "71388002"]);
/// let focus = FocusProcedureList::new(vec![(Concept::from("77477000"), "CT".into())]);
///
/// let mapped = map_procedure(&service, &Concept::from("169069000"), &focus).unwrap();
/// assert_eq!(mapped.as_str(), "77477000");
/// ```
pub fn map_procedure<S: TerminologyService>(
    service: &S,
    base_procedure: &Concept,
    focus: &FocusProcedureList,
) -> Result<Concept> {
    let ancestors: HashSet<Concept> = service
        .expand_value_set(&ecl::ancestors_or_self(base_procedure.as_str()))?
        .into_iter()
        .collect();

    Ok(focus
        .concepts()
        .find(|concept| ancestors.contains(*concept))
        .cloned()
        .unwrap_or_else(|| base_procedure.clone()))
}
