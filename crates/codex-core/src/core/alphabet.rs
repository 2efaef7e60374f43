//! Residue, base, and functional-group alphabets used by the sequence generator.

use phf::{Map, phf_map};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AminoAcid {
    pub code: char,
    pub three_letter: &'static str,
    /// Side-chain charge at physiological pH.
    pub charge: f64,
    pub hydrophobicity: f64,
    pub groups: &'static [(&'static str, u32)],
    pub molecular_weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseKind {
    Purine,
    Pyrimidine,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nucleotide {
    pub code: char,
    pub name: &'static str,
    pub kind: BaseKind,
    pub molecular_weight: f64,
    /// THz
    pub thz_frequency: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupSymbol {
    pub symbol: &'static str,
    pub bcs_weight: f64,
    pub molecular_weight: f64,
    pub bond_type: &'static str,
}

/// Sampling order of the twenty standard residues.
pub const AMINO_ACID_LETTERS: [char; 20] = [
    'A', 'R', 'N', 'D', 'C', 'Q', 'E', 'G', 'H', 'I', 'L', 'K', 'M', 'F', 'P', 'S', 'T', 'W',
    'Y', 'V',
];

macro_rules! aa {
    ($code:literal, $three:literal, $charge:expr, $hydro:expr, [$(($g:literal, $n:literal)),*], $mw:expr) => {
        AminoAcid {
            code: $code,
            three_letter: $three,
            charge: $charge,
            hydrophobicity: $hydro,
            groups: &[$(($g, $n)),*],
            molecular_weight: $mw,
        }
    };
}

pub static AMINO_ACIDS: Map<char, AminoAcid> = phf_map! {
    'A' => aa!('A', "Ala", 0.0, 0.62, [("methyl", 1)], 89.1),
    'R' => aa!('R', "Arg", 1.0, -2.53, [("amine_NH2", 2), ("guanidinium", 1)], 174.2),
    'N' => aa!('N', "Asn", 0.0, -0.78, [("carbonyl_CO", 1), ("amine_NH2", 1)], 132.1),
    'D' => aa!('D', "Asp", -1.0, -0.90, [("carboxyl_COOH", 2)], 133.1),
    'C' => aa!('C', "Cys", 0.0, 0.29, [("thiol_SH", 1)], 121.2),
    'Q' => aa!('Q', "Gln", 0.0, -0.85, [("carbonyl_CO", 1), ("amine_NH2", 1)], 146.1),
    'E' => aa!('E', "Glu", -1.0, -0.74, [("carboxyl_COOH", 2)], 147.1),
    'G' => aa!('G', "Gly", 0.0, 0.48, [], 75.1),
    'H' => aa!('H', "His", 0.5, -0.40, [("imidazole", 1)], 155.2),
    'I' => aa!('I', "Ile", 0.0, 1.38, [("methyl", 2)], 131.2),
    'L' => aa!('L', "Leu", 0.0, 1.06, [("methyl", 2)], 131.2),
    'K' => aa!('K', "Lys", 1.0, -1.50, [("amine_NH2", 1)], 146.2),
    'M' => aa!('M', "Met", 0.0, 0.64, [("thioether", 1), ("methyl", 1)], 149.2),
    'F' => aa!('F', "Phe", 0.0, 1.19, [("phenyl", 1)], 165.2),
    'P' => aa!('P', "Pro", 0.0, 0.12, [("cyclic", 1)], 115.1),
    'S' => aa!('S', "Ser", 0.0, -0.18, [("hydroxyl_OH", 1)], 105.1),
    'T' => aa!('T', "Thr", 0.0, -0.05, [("hydroxyl_OH", 1), ("methyl", 1)], 119.1),
    'W' => aa!('W', "Trp", 0.0, 0.81, [("indole", 1)], 204.2),
    'Y' => aa!('Y', "Tyr", 0.0, 0.26, [("hydroxyl_OH", 1), ("phenyl", 1)], 181.2),
    'V' => aa!('V', "Val", 0.0, 1.08, [("methyl", 2)], 117.1),
};

pub static NUCLEOTIDES: Map<char, Nucleotide> = phf_map! {
    'A' => Nucleotide { code: 'A', name: "Adenine", kind: BaseKind::Purine, molecular_weight: 135.1, thz_frequency: 0.65 },
    'T' => Nucleotide { code: 'T', name: "Thymine", kind: BaseKind::Pyrimidine, molecular_weight: 126.1, thz_frequency: 0.55 },
    'G' => Nucleotide { code: 'G', name: "Guanine", kind: BaseKind::Purine, molecular_weight: 151.1, thz_frequency: 0.70 },
    'C' => Nucleotide { code: 'C', name: "Cytosine", kind: BaseKind::Pyrimidine, molecular_weight: 111.1, thz_frequency: 0.60 },
    'U' => Nucleotide { code: 'U', name: "Uracil", kind: BaseKind::Pyrimidine, molecular_weight: 112.1, thz_frequency: 0.58 },
};

/// Groups that carry a BCS weight. Residue groups absent here (methyl, thiol, ...) score zero.
pub static FUNCTIONAL_GROUPS: Map<&'static str, GroupSymbol> = phf_map! {
    "hydroxyl_OH" => GroupSymbol { symbol: "-OH", bcs_weight: 1.0, molecular_weight: 17.0, bond_type: "H-bond donor/acceptor" },
    "amine_NH2" => GroupSymbol { symbol: "-NH2", bcs_weight: 0.8, molecular_weight: 16.0, bond_type: "H-bond donor" },
    "carbonyl_CO" => GroupSymbol { symbol: "C=O", bcs_weight: 0.6, molecular_weight: 28.0, bond_type: "H-bond acceptor" },
    "carboxyl_COOH" => GroupSymbol { symbol: "-COOH", bcs_weight: 0.7, molecular_weight: 45.0, bond_type: "H-bond donor/acceptor" },
    "ether_O" => GroupSymbol { symbol: "-O-", bcs_weight: 0.5, molecular_weight: 16.0, bond_type: "H-bond acceptor" },
    "sulfonate_SO3" => GroupSymbol { symbol: "-SO3-", bcs_weight: -2.0, molecular_weight: 80.1, bond_type: "kosmotrope" },
    "sulfate_OSO3" => GroupSymbol { symbol: "-OSO3-", bcs_weight: -1.8, molecular_weight: 96.1, bond_type: "kosmotrope" },
    "quaternary_ammonium_R4N" => GroupSymbol { symbol: "-N(R)4+", bcs_weight: -1.5, molecular_weight: 74.0, bond_type: "chaotrope" },
    "phosphate_OPO3" => GroupSymbol { symbol: "-OPO3-", bcs_weight: -1.2, molecular_weight: 95.0, bond_type: "kosmotrope" },
    "iodine_I" => GroupSymbol { symbol: "-I", bcs_weight: -0.8, molecular_weight: 126.9, bond_type: "halogen" },
    "chlorine_Cl" => GroupSymbol { symbol: "-Cl", bcs_weight: -0.5, molecular_weight: 35.5, bond_type: "halogen" },
};

pub fn group_weight(name: &str) -> f64 {
    FUNCTIONAL_GROUPS
        .get(name)
        .map(|g| g.bcs_weight)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_order_covers_every_amino_acid() {
        assert_eq!(AMINO_ACIDS.len(), AMINO_ACID_LETTERS.len());
        for code in AMINO_ACID_LETTERS {
            let aa = AMINO_ACIDS.get(&code).unwrap();
            assert_eq!(aa.code, code);
        }
    }

    #[test]
    fn only_basic_and_acidic_residues_are_charged() {
        let charged: Vec<char> = AMINO_ACID_LETTERS
            .iter()
            .copied()
            .filter(|c| AMINO_ACIDS[c].charge != 0.0)
            .collect();
        assert_eq!(charged, vec!['R', 'D', 'E', 'H', 'K']);
    }

    #[test]
    fn dna_bases_split_into_purines_and_pyrimidines() {
        assert_eq!(NUCLEOTIDES[&'A'].kind, BaseKind::Purine);
        assert_eq!(NUCLEOTIDES[&'G'].kind, BaseKind::Purine);
        assert_eq!(NUCLEOTIDES[&'C'].kind, BaseKind::Pyrimidine);
        assert_eq!(NUCLEOTIDES[&'U'].kind, BaseKind::Pyrimidine);
    }

    #[test]
    fn unweighted_groups_score_zero() {
        assert_eq!(group_weight("methyl"), 0.0);
        assert_eq!(group_weight("hydroxyl_OH"), 1.0);
        assert_eq!(group_weight("phosphate_OPO3"), -1.2);
    }
}
