//! PSI-MI controlled vocabulary terms
//!
//! These `(short name, MI identifier)` pairs are matched by string equality
//! throughout the model, the comparators and the enrichment engine, so they
//! must not change.

use serde::Serialize;
use std::fmt;

/// A well-known controlled-vocabulary term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Term {
    pub name: &'static str,
    pub mi: &'static str,
}

impl Term {
    pub const fn new(name: &'static str, mi: &'static str) -> Self {
        Self { name, mi }
    }

    /// Whether a term described by an optional MI identifier and a short name
    /// is this term. MI identifiers win when present.
    pub fn matches(&self, mi: Option<&str>, short_name: &str) -> bool {
        match mi {
            Some(mi) => mi == self.mi,
            None => short_name.eq_ignore_ascii_case(self.name),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.mi)
    }
}

// ============================================================================
// Xref qualifiers
// ============================================================================

pub const IDENTITY: Term = Term::new("identity", "MI:0356");
pub const SECONDARY: Term = Term::new("secondary", "MI:0360");
pub const IMEX_PRIMARY: Term = Term::new("imex-primary", "MI:0662");

// ============================================================================
// Databases
// ============================================================================

pub const PSI_MI: Term = Term::new("psi-mi", "MI:0488");
pub const UNIPROTKB: Term = Term::new("uniprotkb", "MI:0486");
pub const REFSEQ: Term = Term::new("refseq", "MI:0481");
pub const ENSEMBL: Term = Term::new("ensembl", "MI:0476");
pub const ENSEMBL_GENOMES: Term = Term::new("ensemblgenomes", "MI:1013");
pub const ENTREZ_GENE: Term = Term::new("entrez gene/locuslink", "MI:0477");
pub const DDBJ_EMBL_GENBANK: Term = Term::new("ddbj/embl/genbank", "MI:0475");
pub const INTERPRO: Term = Term::new("interpro", "MI:0449");
pub const CHEBI: Term = Term::new("chebi", "MI:0474");
pub const IMEX: Term = Term::new("imex", "MI:0670");

// ============================================================================
// Checksum methods
// ============================================================================

pub const ROGID: Term = Term::new("rogid", "MI:0859");
pub const RIGID: Term = Term::new("rigid", "MI:1230");
pub const CRC64: Term = Term::new("crc64", "MI:2146");
pub const SMILES: Term = Term::new("smiles string", "MI:2039");
pub const STANDARD_INCHI_KEY: Term = Term::new("standard inchi key", "MI:1101");
pub const STANDARD_INCHI: Term = Term::new("standard inchi", "MI:2010");

// ============================================================================
// Alias types
// ============================================================================

pub const GENE_NAME: Term = Term::new("gene name", "MI:0301");

// ============================================================================
// Interactor types
// ============================================================================

pub const PROTEIN: Term = Term::new("protein", "MI:0326");
pub const GENE: Term = Term::new("gene", "MI:0250");
pub const NUCLEIC_ACID: Term = Term::new("nucleic acid", "MI:0318");
pub const COMPLEX: Term = Term::new("complex", "MI:0314");
pub const BIOACTIVE_ENTITY: Term = Term::new("bioactive entity", "MI:1100");
pub const MOLECULE_SET: Term = Term::new("molecule set", "MI:1304");
pub const UNKNOWN_INTERACTOR: Term = Term::new("unknown participant", "MI:0329");

// ============================================================================
// Participant roles
// ============================================================================

pub const UNSPECIFIED_ROLE: Term = Term::new("unspecified role", "MI:0499");

// ============================================================================
// Range statuses
// ============================================================================

pub const CERTAIN: Term = Term::new("certain", "MI:0335");
pub const UNDETERMINED: Term = Term::new("undetermined", "MI:0339");
pub const N_TERMINAL: Term = Term::new("n-terminal", "MI:0340");
pub const C_TERMINAL: Term = Term::new("c-terminal", "MI:0334");

// ============================================================================
// Annotation topics
// ============================================================================

pub const CAUTION: Term = Term::new("caution", "MI:0667");
