use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoleculeFamily {
    Protein,
    NucleicAcid,
}

/// Atom-sampling scheme used to represent one residue or nucleotide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelType {
    Ca,                     // C-alpha only protein model (CA)
    Backbone,               // Protein backbone N, CA, C, O per residue (N-CA-C-O)
    ThreeSitePerNucleotide, // Coarse-grained nucleic acid, three sites per nucleotide (3SPN)
    C3Prime,                // Single C3' atom per nucleotide (C3')
}

static MODEL_TYPES: Map<&'static str, ModelType> = phf_map! {
    "CA" => ModelType::Ca,
    "N-CA-C-O" => ModelType::Backbone,
    "3SPN" => ModelType::ThreeSitePerNucleotide,
    "C3'" => ModelType::C3Prime,
    "C3" => ModelType::C3Prime,
};

impl ModelType {
    pub const ALL: [ModelType; 4] = [
        ModelType::Ca,
        ModelType::Backbone,
        ModelType::ThreeSitePerNucleotide,
        ModelType::C3Prime,
    ];

    pub fn atoms_per_unit(self) -> usize {
        match self {
            ModelType::Ca | ModelType::C3Prime => 1,
            ModelType::Backbone => 4,
            ModelType::ThreeSitePerNucleotide => 3,
        }
    }

    pub fn family(self) -> MoleculeFamily {
        match self {
            ModelType::Ca | ModelType::Backbone => MoleculeFamily::Protein,
            ModelType::ThreeSitePerNucleotide | ModelType::C3Prime => MoleculeFamily::NucleicAcid,
        }
    }

    #[inline]
    pub fn is_composite(self) -> bool {
        self.atoms_per_unit() > 1
    }

    /// Number of units in a cloud of `length` points, if the length conforms to this model.
    pub fn unit_count(self, length: usize) -> Option<usize> {
        let atoms_per_unit = self.atoms_per_unit();
        (length % atoms_per_unit == 0).then_some(length / atoms_per_unit)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ModelType::Ca => "CA",
            ModelType::Backbone => "N-CA-C-O",
            ModelType::ThreeSitePerNucleotide => "3SPN",
            ModelType::C3Prime => "C3'",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown model type '{0}' (expected one of CA, N-CA-C-O, 3SPN, C3')")]
pub struct ParseModelTypeError(pub String);

impl FromStr for ModelType {
    type Err = ParseModelTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MODEL_TYPES
            .get(s.trim().to_uppercase().as_str())
            .copied()
            .ok_or_else(|| ParseModelTypeError(s.to_string()))
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atoms_per_unit_matches_sampling_scheme() {
        assert_eq!(ModelType::Ca.atoms_per_unit(), 1);
        assert_eq!(ModelType::Backbone.atoms_per_unit(), 4);
        assert_eq!(ModelType::ThreeSitePerNucleotide.atoms_per_unit(), 3);
        assert_eq!(ModelType::C3Prime.atoms_per_unit(), 1);
    }

    #[test]
    fn family_separates_proteins_from_nucleic_acids() {
        assert_eq!(ModelType::Ca.family(), MoleculeFamily::Protein);
        assert_eq!(ModelType::Backbone.family(), MoleculeFamily::Protein);
        assert_eq!(
            ModelType::ThreeSitePerNucleotide.family(),
            MoleculeFamily::NucleicAcid
        );
        assert_eq!(ModelType::C3Prime.family(), MoleculeFamily::NucleicAcid);
    }

    #[test]
    fn unit_count_rejects_lengths_that_do_not_divide() {
        assert_eq!(ModelType::Backbone.unit_count(40), Some(10));
        assert_eq!(ModelType::Backbone.unit_count(41), None);
        assert_eq!(ModelType::ThreeSitePerNucleotide.unit_count(9), Some(3));
        assert_eq!(ModelType::Ca.unit_count(7), Some(7));
    }

    #[test]
    fn from_str_accepts_canonical_names_and_aliases() {
        assert_eq!("CA".parse::<ModelType>(), Ok(ModelType::Ca));
        assert_eq!("n-ca-c-o".parse::<ModelType>(), Ok(ModelType::Backbone));
        assert_eq!(
            "3SPN".parse::<ModelType>(),
            Ok(ModelType::ThreeSitePerNucleotide)
        );
        assert_eq!("C3'".parse::<ModelType>(), Ok(ModelType::C3Prime));
        assert_eq!("C3".parse::<ModelType>(), Ok(ModelType::C3Prime));
    }

    #[test]
    fn from_str_rejects_unknown_names() {
        let err = "CB".parse::<ModelType>().unwrap_err();
        assert_eq!(err, ParseModelTypeError("CB".to_string()));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for model in ModelType::ALL {
            assert_eq!(model.to_string().parse::<ModelType>(), Ok(model));
        }
    }
}
