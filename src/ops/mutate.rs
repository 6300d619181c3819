//! Point substitution of a single residue.
//!
//! The side chain of the mutated residue is not rebuilt: every side-chain atom is removed and
//! only the backbone (plus the beta carbon when the new residue has one) is retained. The
//! residue is renamed to the target amino acid and the mutation's provenance is recorded as
//! remark lines so the output file documents its own origin.

use crate::model::mutation::MutationPlan;
use crate::model::structure::Structure;
use crate::model::types::BETA_CARBON_TITLE;
use crate::ops::error::Error;

/// Applies `plan` to `structure` in place.
///
/// # Errors
///
/// Returns [`Error::ResidueNotFound`] when the plan's residue id is absent and
/// [`Error::ResidueMismatch`] when the residue currently present is not the plan's source amino
/// acid. In both cases the structure is left untouched.
pub fn mutate_residue(structure: &mut Structure, plan: &MutationPlan) -> Result<(), Error> {
    let res_id = plan.residue_id();
    let residue = structure
        .residue(res_id)
        .ok_or(Error::ResidueNotFound { res_id })?;

    if residue.amino_acid() != Some(plan.source()) {
        return Err(Error::residue_mismatch(
            res_id,
            plan.source(),
            residue.name.clone(),
        ));
    }

    let target = plan.target();
    let new_name = target.canonical_name();
    let keep_beta_carbon = target.has_beta_carbon();

    if let Some(residue) = structure.residue_mut(res_id) {
        residue.name = new_name.to_string();
    }

    structure.retain_atoms(|atom| {
        if atom.residue_id != res_id {
            return true;
        }
        let keep = atom.is_backbone() || (keep_beta_carbon && atom.title == BETA_CARBON_TITLE);
        if keep {
            atom.residue_name = new_name.into();
        }
        keep
    });

    annotate(structure, plan);

    Ok(())
}

fn annotate(structure: &mut Structure, plan: &MutationPlan) {
    let provenance = plan.provenance();
    structure.add_remark(format!("Mutation: {}", plan.label()));
    structure.add_remark(format!("Tissue: {}", provenance.tissue));
    structure.add_remark(format!("Histology: {}", provenance.histology));
    structure.add_remark(format!("Zygosity: {}", provenance.zygosity));
    structure.add_remark(format!("Somatic status: {}", provenance.somatic_status));
    structure.add_remark(format!("Transcript: {}", provenance.transcript));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::atom::Atom;
    use crate::model::mutation::{MutationName, Provenance};
    use crate::model::types::{AminoAcid, Point};

    fn cysteine_structure() -> Structure {
        let mut structure = Structure::new();
        let atoms = [
            (1, " N  ", "GLY", 9),
            (2, " CA ", "GLY", 9),
            (3, " N  ", "CYS", 10),
            (4, " CA ", "CYS", 10),
            (5, " C  ", "CYS", 10),
            (6, " O  ", "CYS", 10),
            (7, " CB ", "CYS", 10),
            (8, " SG ", "CYS", 10),
            (9, " N  ", "SER", 11),
            (10, " OG ", "SER", 11),
        ];
        for (serial, title, res_name, res_id) in atoms {
            let pos = Point::new(serial as f64, 0.0, 0.0);
            structure.add_atom(serial, Atom::new(title, res_name, 'A', res_id, pos));
        }
        structure
    }

    fn plan(source: AminoAcid, position: usize, res_id: i32, target: AminoAcid) -> MutationPlan {
        let name = MutationName {
            source: source.code(),
            position,
            target: target.code(),
        };
        let provenance = Provenance {
            somatic_status: "Confirmed somatic variant".into(),
            transcript: "ENST00000000001".into(),
            zygosity: "het".into(),
            tissue: "lung".into(),
            histology: "carcinoma".into(),
        };
        MutationPlan::new(name, res_id, source, target, provenance)
    }

    fn titles(structure: &Structure, res_id: i32) -> Vec<String> {
        structure
            .residue_atoms(res_id)
            .map(|atom| atom.title.to_string())
            .collect()
    }

    #[test]
    fn cysteine_to_alanine_keeps_backbone_and_beta_carbon() {
        let mut structure = cysteine_structure();

        mutate_residue(&mut structure, &plan(AminoAcid::CYS, 10, 10, AminoAcid::ALA)).unwrap();

        assert_eq!(titles(&structure, 10), vec![" N  ", " CA ", " C  ", " O  ", " CB "]);
        assert_eq!(structure.residue(10).unwrap().name, "ALA");
        assert!(
            structure
                .residue_atoms(10)
                .all(|atom| atom.residue_name == "ALA")
        );
    }

    #[test]
    fn glycine_target_drops_beta_carbon() {
        let mut structure = cysteine_structure();

        mutate_residue(&mut structure, &plan(AminoAcid::CYS, 10, 10, AminoAcid::GLY)).unwrap();

        assert_eq!(titles(&structure, 10), vec![" N  ", " CA ", " C  ", " O  "]);
        assert_eq!(structure.residue(10).unwrap().name, "GLY");
    }

    #[test]
    fn neighbouring_residues_are_untouched() {
        let mut structure = cysteine_structure();

        mutate_residue(&mut structure, &plan(AminoAcid::CYS, 10, 10, AminoAcid::GLY)).unwrap();

        assert_eq!(titles(&structure, 9), vec![" N  ", " CA "]);
        assert_eq!(titles(&structure, 11), vec![" N  ", " OG "]);
        assert_eq!(structure.atom(10).unwrap().residue_name, "SER");
    }

    #[test]
    fn histidine_target_uses_canonical_tautomer_name() {
        let mut structure = cysteine_structure();

        mutate_residue(&mut structure, &plan(AminoAcid::CYS, 10, 10, AminoAcid::HIS)).unwrap();

        assert_eq!(structure.residue(10).unwrap().name, "HIE");
        assert_eq!(structure.residue(10).unwrap().code(), Some('H'));
    }

    #[test]
    fn appends_six_remarks_in_fixed_order() {
        let mut structure = cysteine_structure();

        mutate_residue(&mut structure, &plan(AminoAcid::CYS, 42, 10, AminoAcid::ALA)).unwrap();

        assert_eq!(
            structure.remarks,
            vec![
                "Mutation: C42A",
                "Tissue: lung",
                "Histology: carcinoma",
                "Zygosity: het",
                "Somatic status: Confirmed somatic variant",
                "Transcript: ENST00000000001",
            ]
        );
    }

    #[test]
    fn source_mismatch_leaves_structure_unmodified() {
        let mut structure = cysteine_structure();
        let before = structure.clone();

        let err = mutate_residue(&mut structure, &plan(AminoAcid::SER, 10, 10, AminoAcid::ALA))
            .unwrap_err();

        assert!(matches!(err, Error::ResidueMismatch { res_id: 10, .. }));
        assert_eq!(structure, before);
    }

    #[test]
    fn missing_residue_is_reported() {
        let mut structure = cysteine_structure();
        let before = structure.clone();

        let err = mutate_residue(&mut structure, &plan(AminoAcid::CYS, 10, 99, AminoAcid::ALA))
            .unwrap_err();

        assert!(matches!(err, Error::ResidueNotFound { res_id: 99 }));
        assert_eq!(structure, before);
    }
}
