//! Resolution of raw mutation records into structure-addressable plans.

use crate::model::mutation::{MutationPlan, MutationRecord};
use crate::model::structure::Structure;
use crate::model::types::AminoAcid;
use crate::ops::align::SequenceMap;
use crate::ops::error::Error;
use crate::ops::sequence::parse_mutation_name;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use tracing::{debug, info, warn};

/// Validates `records` against the alignment and the structure.
///
/// Records are skipped (with a log entry) when the reference residue at their position differs
/// from their declared source, when the target is not a standard amino acid, when their position
/// has no residue in the structure, or when the structure residue there is not the declared
/// source. Records sharing a position and target collapse into the first valid one. Each plan
/// keeps the provenance of the row it came from.
///
/// The returned plans are ordered by position, then target.
///
/// # Errors
///
/// A malformed mutation name aborts with [`Error::MalformedMutation`].
pub fn build_plans(
    records: &[MutationRecord],
    map: &SequenceMap,
    structure: &Structure,
) -> Result<Vec<MutationPlan>, Error> {
    let mut plans: BTreeMap<(usize, char), MutationPlan> = BTreeMap::new();

    for record in records {
        let name = parse_mutation_name(&record.name)?;

        let reference_code = map.reference_code(name.position);
        if reference_code != Some(name.source) {
            warn!(
                mutation = %record.name,
                reference = ?reference_code,
                "mutation does not match the aligned reference sequence, skipping"
            );
            continue;
        }

        let (Some(source), Some(target)) = (
            AminoAcid::from_code(name.source),
            AminoAcid::from_code(name.target),
        ) else {
            let code = if AminoAcid::from_code(name.source).is_none() {
                name.source
            } else {
                name.target
            };
            warn!(
                mutation = %record.name,
                "{}, skipping",
                Error::UnsupportedAminoAcid { code }
            );
            continue;
        };

        let slot = match plans.entry((name.position, name.target)) {
            Entry::Occupied(_) => {
                debug!(mutation = %record.name, "duplicate mutation ignored");
                continue;
            }
            Entry::Vacant(slot) => slot,
        };

        let Some(res_id) = map.residue_id(name.position) else {
            warn!(mutation = %record.name, "residue is not present in the structure, skipping");
            continue;
        };
        let Some(residue) = structure.residue(res_id) else {
            warn!(
                mutation = %record.name,
                res_id,
                "residue is missing from the structure, skipping"
            );
            continue;
        };
        if residue.amino_acid() != Some(source) {
            warn!(
                mutation = %record.name,
                res_id,
                found = %residue.name,
                "structure residue differs from the mutation source, skipping"
            );
            continue;
        }

        slot.insert(MutationPlan::new(
            name,
            res_id,
            source,
            target,
            record.provenance.clone(),
        ));
    }

    info!(
        records = records.len(),
        plans = plans.len(),
        "resolved mutation plans"
    );

    Ok(plans.into_values().collect())
}
