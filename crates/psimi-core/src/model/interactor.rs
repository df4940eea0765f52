//! Interactors: the molecules taking part in interactions.
//!
//! Every kind shares an [`InteractorCore`]. Kinds that track a primary
//! identifier (a protein's UniProtKB accession, a gene's Ensembl id...) do so
//! through cached views over the core's observed collections, so the derived
//! value can never drift from the backing cross-references.

use super::attributes::{Alias, Annotation, Checksum};
use super::complex::Complex;
use super::cv_term::CvTerm;
use super::observed::{ObservedList, Selector};
use super::organism::Organism;
use super::xref::Xref;
use psimi_common::{vocabulary, PsiError, Result, Term};
use std::fmt;

/// Fields shared by every interactor kind.
#[derive(Debug, Clone)]
pub struct InteractorCore {
    short_name: String,
    full_name: Option<String>,
    interactor_type: CvTerm,
    organism: Option<Organism>,
    identifiers: ObservedList<Xref>,
    xrefs: Vec<Xref>,
    checksums: ObservedList<Checksum>,
    annotations: Vec<Annotation>,
    aliases: ObservedList<Alias>,
}

impl InteractorCore {
    /// A core without cached views.
    pub fn new(short_name: impl Into<String>, interactor_type: CvTerm) -> Result<Self> {
        Self::with_views(short_name, interactor_type, &[], &[], &[])
    }

    fn with_views(
        short_name: impl Into<String>,
        interactor_type: CvTerm,
        identifier_views: &[Selector<Xref>],
        checksum_views: &[Selector<Checksum>],
        alias_views: &[Selector<Alias>],
    ) -> Result<Self> {
        let short_name = short_name.into();
        if short_name.trim().is_empty() {
            return Err(PsiError::missing("Interactor", "short_name"));
        }
        Ok(Self {
            short_name,
            full_name: None,
            interactor_type,
            organism: None,
            identifiers: ObservedList::with_views(identifier_views),
            xrefs: Vec::new(),
            checksums: ObservedList::with_views(checksum_views),
            annotations: Vec::new(),
            aliases: ObservedList::with_views(alias_views),
        })
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn set_short_name(&mut self, short_name: impl Into<String>) -> Result<()> {
        let short_name = short_name.into();
        if short_name.trim().is_empty() {
            return Err(PsiError::missing("Interactor", "short_name"));
        }
        self.short_name = short_name;
        Ok(())
    }

    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    pub fn set_full_name(&mut self, full_name: Option<String>) {
        self.full_name = full_name;
    }

    pub fn interactor_type(&self) -> &CvTerm {
        &self.interactor_type
    }

    pub fn set_interactor_type(&mut self, interactor_type: CvTerm) {
        self.interactor_type = interactor_type;
    }

    pub fn organism(&self) -> Option<&Organism> {
        self.organism.as_ref()
    }

    pub fn organism_mut(&mut self) -> Option<&mut Organism> {
        self.organism.as_mut()
    }

    pub fn set_organism(&mut self, organism: Option<Organism>) {
        self.organism = organism;
    }

    pub fn identifiers(&self) -> &ObservedList<Xref> {
        &self.identifiers
    }

    pub fn identifiers_mut(&mut self) -> &mut ObservedList<Xref> {
        &mut self.identifiers
    }

    pub fn xrefs(&self) -> &[Xref] {
        &self.xrefs
    }

    pub fn xrefs_mut(&mut self) -> &mut Vec<Xref> {
        &mut self.xrefs
    }

    pub fn checksums(&self) -> &ObservedList<Checksum> {
        &self.checksums
    }

    pub fn checksums_mut(&mut self) -> &mut ObservedList<Checksum> {
        &mut self.checksums
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn annotations_mut(&mut self) -> &mut Vec<Annotation> {
        &mut self.annotations
    }

    pub fn aliases(&self) -> &ObservedList<Alias> {
        &self.aliases
    }

    pub fn aliases_mut(&mut self) -> &mut ObservedList<Alias> {
        &mut self.aliases
    }

    fn cached_identifier(&self, view: usize) -> Option<&str> {
        self.identifiers.cached(view).map(Xref::id)
    }

    fn set_identifier(&mut self, view: usize, database: Term, id: Option<&str>) -> Result<()> {
        match id {
            Some(id) => {
                let xref = Xref::identity(database, id)?;
                self.identifiers.replace_cached(view, xref);
            }
            None => {
                self.identifiers.remove_candidates(view);
            }
        }
        Ok(())
    }

    fn cached_checksum(&self, view: usize) -> Option<&str> {
        self.checksums.cached(view).map(Checksum::value)
    }

    fn set_checksum(&mut self, view: usize, method: Term, value: Option<&str>) -> Result<()> {
        match value {
            Some(value) => {
                let checksum = Checksum::new(method.into(), value)?;
                self.checksums.replace_cached(view, checksum);
            }
            None => {
                self.checksums.remove_candidates(view);
            }
        }
        Ok(())
    }
}

fn is_uniprotkb(xref: &Xref) -> bool {
    xref.is_from(vocabulary::UNIPROTKB)
}

fn is_refseq(xref: &Xref) -> bool {
    xref.is_from(vocabulary::REFSEQ)
}

fn is_ensembl(xref: &Xref) -> bool {
    xref.is_from(vocabulary::ENSEMBL)
}

fn is_ensembl_genomes(xref: &Xref) -> bool {
    xref.is_from(vocabulary::ENSEMBL_GENOMES)
}

fn is_entrez(xref: &Xref) -> bool {
    xref.is_from(vocabulary::ENTREZ_GENE)
}

fn is_ddbj(xref: &Xref) -> bool {
    xref.is_from(vocabulary::DDBJ_EMBL_GENBANK)
}

fn is_chebi(xref: &Xref) -> bool {
    xref.is_from(vocabulary::CHEBI)
}

fn is_rogid(checksum: &Checksum) -> bool {
    checksum.is_method(vocabulary::ROGID)
}

fn is_smiles(checksum: &Checksum) -> bool {
    checksum.is_method(vocabulary::SMILES)
}

fn is_inchi_key(checksum: &Checksum) -> bool {
    checksum.is_method(vocabulary::STANDARD_INCHI_KEY)
}

fn is_inchi(checksum: &Checksum) -> bool {
    checksum.is_method(vocabulary::STANDARD_INCHI)
}

fn is_gene_name(alias: &Alias) -> bool {
    alias.is_of(vocabulary::GENE_NAME)
}

// ============================================================================
// Protein
// ============================================================================

#[derive(Debug, Clone)]
pub struct Protein {
    core: InteractorCore,
    sequence: Option<String>,
}

impl Protein {
    const UNIPROTKB: usize = 0;
    const REFSEQ: usize = 1;
    const ROGID: usize = 0;
    const GENE_NAME: usize = 0;

    pub fn new(short_name: impl Into<String>) -> Result<Self> {
        Self::with_type(short_name, vocabulary::PROTEIN.into())
    }

    pub fn with_type(short_name: impl Into<String>, interactor_type: CvTerm) -> Result<Self> {
        Ok(Self {
            core: InteractorCore::with_views(
                short_name,
                interactor_type,
                &[is_uniprotkb, is_refseq],
                &[is_rogid],
                &[is_gene_name],
            )?,
            sequence: None,
        })
    }

    pub fn core(&self) -> &InteractorCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut InteractorCore {
        &mut self.core
    }

    /// The primary UniProtKB accession.
    pub fn uniprotkb(&self) -> Option<&str> {
        self.core.cached_identifier(Self::UNIPROTKB)
    }

    pub fn set_uniprotkb(&mut self, accession: Option<&str>) -> Result<()> {
        self.core
            .set_identifier(Self::UNIPROTKB, vocabulary::UNIPROTKB, accession)
    }

    pub fn refseq(&self) -> Option<&str> {
        self.core.cached_identifier(Self::REFSEQ)
    }

    pub fn set_refseq(&mut self, id: Option<&str>) -> Result<()> {
        self.core.set_identifier(Self::REFSEQ, vocabulary::REFSEQ, id)
    }

    pub fn rogid(&self) -> Option<&str> {
        self.core.cached_checksum(Self::ROGID)
    }

    pub fn set_rogid(&mut self, rogid: Option<&str>) -> Result<()> {
        self.core.set_checksum(Self::ROGID, vocabulary::ROGID, rogid)
    }

    pub fn gene_name(&self) -> Option<&str> {
        self.core.aliases.cached(Self::GENE_NAME).map(Alias::name)
    }

    pub fn set_gene_name(&mut self, name: Option<&str>) -> Result<()> {
        match name {
            Some(name) => {
                let alias = Alias::typed(vocabulary::GENE_NAME.into(), name)?;
                self.core.aliases.replace_cached(Self::GENE_NAME, alias);
            }
            None => {
                self.core.aliases.remove_candidates(Self::GENE_NAME);
            }
        }
        Ok(())
    }

    pub fn sequence(&self) -> Option<&str> {
        self.sequence.as_deref()
    }

    pub fn set_sequence(&mut self, sequence: Option<String>) {
        self.sequence = sequence;
    }

    /// The CRC64 checksums carried by this protein.
    pub fn crc64s(&self) -> impl Iterator<Item = &Checksum> {
        self.core
            .checksums
            .iter()
            .filter(|c| c.is_method(vocabulary::CRC64))
    }
}

// ============================================================================
// Gene
// ============================================================================

#[derive(Debug, Clone)]
pub struct Gene {
    core: InteractorCore,
}

impl Gene {
    const ENSEMBL: usize = 0;
    const ENSEMBL_GENOMES: usize = 1;
    const ENTREZ: usize = 2;
    const REFSEQ: usize = 3;

    pub fn new(short_name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            core: InteractorCore::with_views(
                short_name,
                vocabulary::GENE.into(),
                &[is_ensembl, is_ensembl_genomes, is_entrez, is_refseq],
                &[],
                &[],
            )?,
        })
    }

    pub fn core(&self) -> &InteractorCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut InteractorCore {
        &mut self.core
    }

    pub fn ensembl(&self) -> Option<&str> {
        self.core.cached_identifier(Self::ENSEMBL)
    }

    pub fn set_ensembl(&mut self, id: Option<&str>) -> Result<()> {
        self.core.set_identifier(Self::ENSEMBL, vocabulary::ENSEMBL, id)
    }

    pub fn ensembl_genomes(&self) -> Option<&str> {
        self.core.cached_identifier(Self::ENSEMBL_GENOMES)
    }

    pub fn set_ensembl_genomes(&mut self, id: Option<&str>) -> Result<()> {
        self.core
            .set_identifier(Self::ENSEMBL_GENOMES, vocabulary::ENSEMBL_GENOMES, id)
    }

    pub fn entrez_gene_id(&self) -> Option<&str> {
        self.core.cached_identifier(Self::ENTREZ)
    }

    pub fn set_entrez_gene_id(&mut self, id: Option<&str>) -> Result<()> {
        self.core.set_identifier(Self::ENTREZ, vocabulary::ENTREZ_GENE, id)
    }

    pub fn refseq(&self) -> Option<&str> {
        self.core.cached_identifier(Self::REFSEQ)
    }

    pub fn set_refseq(&mut self, id: Option<&str>) -> Result<()> {
        self.core.set_identifier(Self::REFSEQ, vocabulary::REFSEQ, id)
    }
}

// ============================================================================
// Nucleic acid
// ============================================================================

#[derive(Debug, Clone)]
pub struct NucleicAcid {
    core: InteractorCore,
}

impl NucleicAcid {
    const DDBJ: usize = 0;
    const REFSEQ: usize = 1;

    pub fn new(short_name: impl Into<String>) -> Result<Self> {
        Self::with_type(short_name, vocabulary::NUCLEIC_ACID.into())
    }

    pub fn with_type(short_name: impl Into<String>, interactor_type: CvTerm) -> Result<Self> {
        Ok(Self {
            core: InteractorCore::with_views(
                short_name,
                interactor_type,
                &[is_ddbj, is_refseq],
                &[],
                &[],
            )?,
        })
    }

    pub fn core(&self) -> &InteractorCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut InteractorCore {
        &mut self.core
    }

    pub fn ddbj_embl_genbank(&self) -> Option<&str> {
        self.core.cached_identifier(Self::DDBJ)
    }

    pub fn set_ddbj_embl_genbank(&mut self, id: Option<&str>) -> Result<()> {
        self.core
            .set_identifier(Self::DDBJ, vocabulary::DDBJ_EMBL_GENBANK, id)
    }

    pub fn refseq(&self) -> Option<&str> {
        self.core.cached_identifier(Self::REFSEQ)
    }

    pub fn set_refseq(&mut self, id: Option<&str>) -> Result<()> {
        self.core.set_identifier(Self::REFSEQ, vocabulary::REFSEQ, id)
    }
}

// ============================================================================
// Bioactive entity
// ============================================================================

/// A small molecule, identified by ChEBI and structural checksums.
#[derive(Debug, Clone)]
pub struct BioactiveEntity {
    core: InteractorCore,
}

impl BioactiveEntity {
    const CHEBI: usize = 0;
    const SMILES: usize = 0;
    const INCHI_KEY: usize = 1;
    const INCHI: usize = 2;

    pub fn new(short_name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            core: InteractorCore::with_views(
                short_name,
                vocabulary::BIOACTIVE_ENTITY.into(),
                &[is_chebi],
                &[is_smiles, is_inchi_key, is_inchi],
                &[],
            )?,
        })
    }

    pub fn core(&self) -> &InteractorCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut InteractorCore {
        &mut self.core
    }

    pub fn chebi(&self) -> Option<&str> {
        self.core.cached_identifier(Self::CHEBI)
    }

    pub fn set_chebi(&mut self, id: Option<&str>) -> Result<()> {
        self.core.set_identifier(Self::CHEBI, vocabulary::CHEBI, id)
    }

    pub fn smiles(&self) -> Option<&str> {
        self.core.cached_checksum(Self::SMILES)
    }

    pub fn set_smiles(&mut self, smiles: Option<&str>) -> Result<()> {
        self.core.set_checksum(Self::SMILES, vocabulary::SMILES, smiles)
    }

    pub fn standard_inchi_key(&self) -> Option<&str> {
        self.core.cached_checksum(Self::INCHI_KEY)
    }

    pub fn set_standard_inchi_key(&mut self, key: Option<&str>) -> Result<()> {
        self.core
            .set_checksum(Self::INCHI_KEY, vocabulary::STANDARD_INCHI_KEY, key)
    }

    pub fn standard_inchi(&self) -> Option<&str> {
        self.core.cached_checksum(Self::INCHI)
    }

    pub fn set_standard_inchi(&mut self, inchi: Option<&str>) -> Result<()> {
        self.core
            .set_checksum(Self::INCHI, vocabulary::STANDARD_INCHI, inchi)
    }
}

// ============================================================================
// Interactor set
// ============================================================================

/// A group of interchangeable molecules that cannot be told apart experimentally.
#[derive(Debug, Clone)]
pub struct InteractorSet {
    core: InteractorCore,
    members: Vec<Interactor>,
}

impl InteractorSet {
    pub fn new(short_name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            core: InteractorCore::new(short_name, vocabulary::MOLECULE_SET.into())?,
            members: Vec::new(),
        })
    }

    pub fn core(&self) -> &InteractorCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut InteractorCore {
        &mut self.core
    }

    pub fn members(&self) -> &[Interactor] {
        &self.members
    }

    pub fn add_member(&mut self, member: impl Into<Interactor>) {
        self.members.push(member.into());
    }

    pub fn remove_member(&mut self, index: usize) -> Option<Interactor> {
        (index < self.members.len()).then(|| self.members.remove(index))
    }
}

// ============================================================================
// Interactor
// ============================================================================

/// Interactor kinds in comparison priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InteractorKind {
    BioactiveEntity,
    Protein,
    Gene,
    NucleicAcid,
    Complex,
    InteractorSet,
    Other,
}

#[derive(Debug, Clone)]
pub enum Interactor {
    BioactiveEntity(BioactiveEntity),
    Protein(Protein),
    Gene(Gene),
    NucleicAcid(NucleicAcid),
    Complex(Complex),
    InteractorSet(InteractorSet),
    Other(InteractorCore),
}

impl Interactor {
    /// An interactor of no specific kind, typed "unknown participant".
    pub fn unknown(short_name: impl Into<String>) -> Result<Self> {
        Ok(Self::Other(InteractorCore::new(
            short_name,
            vocabulary::UNKNOWN_INTERACTOR.into(),
        )?))
    }

    pub fn kind(&self) -> InteractorKind {
        match self {
            Self::BioactiveEntity(_) => InteractorKind::BioactiveEntity,
            Self::Protein(_) => InteractorKind::Protein,
            Self::Gene(_) => InteractorKind::Gene,
            Self::NucleicAcid(_) => InteractorKind::NucleicAcid,
            Self::Complex(_) => InteractorKind::Complex,
            Self::InteractorSet(_) => InteractorKind::InteractorSet,
            Self::Other(_) => InteractorKind::Other,
        }
    }

    pub fn core(&self) -> &InteractorCore {
        match self {
            Self::BioactiveEntity(i) => i.core(),
            Self::Protein(i) => i.core(),
            Self::Gene(i) => i.core(),
            Self::NucleicAcid(i) => i.core(),
            Self::Complex(i) => i.core(),
            Self::InteractorSet(i) => i.core(),
            Self::Other(core) => core,
        }
    }

    pub fn core_mut(&mut self) -> &mut InteractorCore {
        match self {
            Self::BioactiveEntity(i) => i.core_mut(),
            Self::Protein(i) => i.core_mut(),
            Self::Gene(i) => i.core_mut(),
            Self::NucleicAcid(i) => i.core_mut(),
            Self::Complex(i) => i.core_mut(),
            Self::InteractorSet(i) => i.core_mut(),
            Self::Other(core) => core,
        }
    }

    pub fn short_name(&self) -> &str {
        self.core().short_name()
    }

    pub fn as_protein(&self) -> Option<&Protein> {
        match self {
            Self::Protein(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_protein_mut(&mut self) -> Option<&mut Protein> {
        match self {
            Self::Protein(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_complex(&self) -> Option<&Complex> {
        match self {
            Self::Complex(c) => Some(c),
            _ => None,
        }
    }
}

impl From<Protein> for Interactor {
    fn from(protein: Protein) -> Self {
        Self::Protein(protein)
    }
}

impl From<Gene> for Interactor {
    fn from(gene: Gene) -> Self {
        Self::Gene(gene)
    }
}

impl From<NucleicAcid> for Interactor {
    fn from(nucleic_acid: NucleicAcid) -> Self {
        Self::NucleicAcid(nucleic_acid)
    }
}

impl From<BioactiveEntity> for Interactor {
    fn from(entity: BioactiveEntity) -> Self {
        Self::BioactiveEntity(entity)
    }
}

impl From<Complex> for Interactor {
    fn from(complex: Complex) -> Self {
        Self::Complex(complex)
    }
}

impl From<InteractorSet> for Interactor {
    fn from(set: InteractorSet) -> Self {
        Self::InteractorSet(set)
    }
}

impl From<InteractorCore> for Interactor {
    fn from(core: InteractorCore) -> Self {
        Self::Other(core)
    }
}

impl fmt::Display for Interactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.core();
        write!(f, "{} ({})", core.short_name(), core.interactor_type().short_name())?;
        if let Some(organism) = core.organism() {
            write!(f, ", {}", organism)?;
        }
        Ok(())
    }
}
