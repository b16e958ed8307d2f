// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::cmp::{self, Ordering};
use std::fmt;
use std::hash::{Hash, Hasher};

use bio::alphabets::{self, Alphabet};
use bio_types::genome::{self, Locus};

use crate::errors::Error;
use crate::variants::evidence::Evidence;
use crate::variants::{Extent, Phase, VariantKind};

lazy_static! {
    static ref ALLELE_ALPHABET: Alphabet = alphabets::dna::n_alphabet();
}

/// A single variant call, immutable once built.
///
/// Records are constructed through `VariantRecordBuilder` and afterwards only
/// rebuilt, never mutated, so they can be shared by `Arc` handle between any
/// number of site, contig, genome and population containers. Alleles are
/// stored as ingested (anchor bases included); the canonical form, kind,
/// extent and hashes are derived on demand.
///
/// Equality, hashing and ordering all follow phase-aware identity: the
/// canonical (contig, offset, ref, alt) tuple plus the phase. Identifier and
/// evidence are annotations and do not participate.
#[derive(Clone, Debug, Builder, Getters, CopyGetters)]
#[builder(build_fn(validate = "Self::validate", error = "crate::errors::Error"))]
pub struct VariantRecord {
    /// Contig the record is anchored on.
    #[getset(get = "pub")]
    contig: String,
    /// 0-based reference offset of the first stored allele base.
    #[getset(get_copy = "pub")]
    offset: u64,
    #[getset(get_copy = "pub")]
    #[builder(default = "Phase::Unphased")]
    phase: Phase,
    /// External identifier, if ingestion supplied one.
    #[getset(get = "pub")]
    #[builder(default = "None")]
    identifier: Option<String>,
    #[builder(setter(custom))]
    ref_allele: Vec<u8>,
    #[builder(setter(custom))]
    alt_allele: Vec<u8>,
    #[getset(get = "pub")]
    #[builder(default = "None")]
    evidence: Option<Evidence>,
}

impl VariantRecordBuilder {
    /// Set the reference allele. The allele is uppercased.
    pub fn ref_allele(&mut self, allele: &[u8]) -> &mut Self {
        self.ref_allele = Some(allele.to_ascii_uppercase());
        self
    }

    /// Set the alternate allele. The allele is uppercased.
    pub fn alt_allele(&mut self, allele: &[u8]) -> &mut Self {
        self.alt_allele = Some(allele.to_ascii_uppercase());
        self
    }

    fn validate(&self) -> Result<(), Error> {
        let locus = || {
            Locus::new(
                self.contig.clone().unwrap_or_default(),
                self.offset.unwrap_or(0),
            )
        };
        if let Some(ref allele) = self.ref_allele {
            if allele.is_empty() {
                return Err(Error::EmptyRefAllele { locus: locus() });
            }
        }
        if let Some(ref allele) = self.alt_allele {
            if allele.is_empty() {
                return Err(Error::EmptyAltAllele { locus: locus() });
            }
        }
        for &symbol in self.ref_allele.iter().flatten().chain(self.alt_allele.iter().flatten()) {
            if !ALLELE_ALPHABET.is_word(&[symbol]) {
                return Err(Error::InvalidAlleleSymbol {
                    symbol: symbol as char,
                });
            }
        }
        Ok(())
    }
}

impl VariantRecord {
    pub fn ref_allele(&self) -> &[u8] {
        &self.ref_allele
    }

    pub fn alt_allele(&self) -> &[u8] {
        &self.alt_allele
    }

    pub fn locus(&self) -> Locus {
        Locus::new(self.contig.clone(), self.offset)
    }

    /// Longest strippable common prefix and suffix of the stored alleles.
    /// The prefix is maximal; the suffix is taken from what remains, so both
    /// never overlap.
    fn canonical_parts(&self) -> (usize, usize) {
        let bound = cmp::min(self.ref_allele.len(), self.alt_allele.len());
        let prefix = self
            .ref_allele
            .iter()
            .zip(self.alt_allele.iter())
            .take_while(|(a, b)| a == b)
            .count();
        let suffix = self
            .ref_allele
            .iter()
            .rev()
            .zip(self.alt_allele.iter().rev())
            .take(bound - prefix)
            .take_while(|(a, b)| a == b)
            .count();
        (prefix, suffix)
    }

    /// Canonical offset and alleles, i.e. the stored ones with all common
    /// context stripped. Either canonical allele may be empty.
    pub(crate) fn canonical_alleles(&self) -> (u64, &[u8], &[u8]) {
        let (prefix, suffix) = self.canonical_parts();
        (
            self.offset + prefix as u64,
            &self.ref_allele[prefix..self.ref_allele.len() - suffix],
            &self.alt_allele[prefix..self.alt_allele.len() - suffix],
        )
    }

    pub fn is_canonical(&self) -> bool {
        self.canonical_parts() == (0, 0)
    }

    /// Rebuild this record in canonical form. Idempotent.
    pub fn canonicalize(&self) -> VariantRecord {
        let (offset, ref_allele, alt_allele) = self.canonical_alleles();
        VariantRecord {
            contig: self.contig.clone(),
            offset,
            phase: self.phase,
            identifier: self.identifier.clone(),
            ref_allele: ref_allele.to_owned(),
            alt_allele: alt_allele.to_owned(),
            evidence: self.evidence.clone(),
        }
    }

    pub fn kind(&self) -> VariantKind {
        let (_, ref_allele, alt_allele) = self.canonical_alleles();
        match ref_allele.len().cmp(&alt_allele.len()) {
            Ordering::Equal if ref_allele.is_empty() => VariantKind::Reference,
            Ordering::Equal => VariantKind::Substitution,
            Ordering::Greater => VariantKind::Deletion,
            Ordering::Less => VariantKind::Insertion,
        }
    }

    /// Half-open interval of reference positions this record perturbs.
    ///
    /// Substitutions and deletions span their canonical reference allele;
    /// pure insertions occupy the single insertion point; reference
    /// placeholders perturb nothing.
    pub fn extent(&self) -> Extent {
        let (offset, ref_allele, _) = self.canonical_alleles();
        let len = ref_allele.len() as u64;
        let end = match self.kind() {
            VariantKind::Reference => offset,
            VariantKind::Insertion => offset + cmp::max(len, 1),
            VariantKind::Substitution | VariantKind::Deletion => offset + len,
        };
        Extent::new(genome::Interval::new(self.contig.clone(), offset..end))
    }

    /// Textual key of the canonical variant, phase ignored:
    /// `{contig}:{offset}:{ref}>{alt}`.
    pub fn phase_blind_hash(&self) -> String {
        let (offset, ref_allele, alt_allele) = self.canonical_alleles();
        format!(
            "{}:{}:{}>{}",
            self.contig,
            offset,
            String::from_utf8_lossy(ref_allele),
            String::from_utf8_lossy(alt_allele)
        )
    }

    /// Textual key of the canonical variant including the phase suffix for
    /// phased records.
    pub fn phase_aware_hash(&self) -> String {
        if self.phase.is_phased() {
            format!("{}:{}", self.phase_blind_hash(), self.phase)
        } else {
            self.phase_blind_hash()
        }
    }

    /// Phase-blind equality: same contig and same canonical alleles.
    pub fn is_analogous(&self, other: &VariantRecord) -> bool {
        let (offset, ref_allele, alt_allele) = self.canonical_alleles();
        let (other_offset, other_ref, other_alt) = other.canonical_alleles();
        self.contig == other.contig
            && offset == other_offset
            && ref_allele == other_ref
            && alt_allele == other_alt
    }

    /// Phase-aware equality; the same relation `==` uses.
    pub fn is_equivalent(&self, other: &VariantRecord) -> bool {
        self.is_analogous(other) && self.phase == other.phase
    }

    /// Two records describe a homozygous site if they are analogous but carry
    /// different phase markers.
    pub fn is_homozygous_with(&self, other: &VariantRecord) -> bool {
        self.is_analogous(other) && self.phase != other.phase
    }

    /// Rebuild with a different phase, everything else untouched.
    pub fn with_phase(&self, phase: Phase) -> VariantRecord {
        VariantRecord {
            phase,
            ..self.clone()
        }
    }

    /// Rebuild as a reference placeholder: the alternate allele is replaced
    /// by the reference allele and the evidence is dropped. The identifier
    /// survives so the site stays traceable.
    pub fn nulled_to_reference(&self) -> VariantRecord {
        VariantRecord {
            alt_allele: self.ref_allele.clone(),
            evidence: None,
            ..self.clone()
        }
    }
}

impl PartialEq for VariantRecord {
    fn eq(&self, other: &Self) -> bool {
        self.is_equivalent(other)
    }
}

impl Eq for VariantRecord {}

impl Hash for VariantRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let (offset, ref_allele, alt_allele) = self.canonical_alleles();
        self.contig.hash(state);
        offset.hash(state);
        ref_allele.hash(state);
        alt_allele.hash(state);
        self.phase.hash(state);
    }
}

impl PartialOrd for VariantRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VariantRecord {
    /// Deterministic total order on the same fields the phase-aware hash
    /// spells out.
    fn cmp(&self, other: &Self) -> Ordering {
        let (offset, ref_allele, alt_allele) = self.canonical_alleles();
        let (other_offset, other_ref, other_alt) = other.canonical_alleles();
        (self.contig.as_str(), offset, ref_allele, alt_allele, self.phase).cmp(&(
            other.contig.as_str(),
            other_offset,
            other_ref,
            other_alt,
            other.phase,
        ))
    }
}

impl fmt::Display for VariantRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.phase_aware_hash())
    }
}
