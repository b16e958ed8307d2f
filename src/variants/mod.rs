// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use bio_types::genome::{self, AbstractInterval};

pub mod evidence;
pub mod record;

pub use evidence::{Evidence, EvidenceValue};
pub use record::{VariantRecord, VariantRecordBuilder};

/// Phasing state of a variant record.
///
/// Phased records carry their haplotype assignment in the phase-aware hash
/// (suffixes `H`, `A` and `B`); unphased records have no suffix.
#[derive(
    Display,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    #[strum(serialize = "H")]
    Haploid,
    #[strum(serialize = "A")]
    DiploidA,
    #[strum(serialize = "B")]
    DiploidB,
    #[strum(serialize = ".")]
    Unphased,
}

impl Phase {
    pub fn is_phased(&self) -> bool {
        !matches!(self, Phase::Unphased)
    }
}

/// Classification of a record derived from its canonical allele lengths.
#[derive(
    Display,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
pub enum VariantKind {
    /// Equal-length replacement (SNVs and irreducible MNVs).
    #[strum(serialize = "SUB")]
    Substitution,
    #[strum(serialize = "INS")]
    Insertion,
    #[strum(serialize = "DEL")]
    Deletion,
    /// Site with no remaining alternative allele.
    #[strum(serialize = "REF")]
    Reference,
}

/// Half-open interval of reference positions a record perturbs.
#[derive(Debug, Clone, PartialEq, Eq, Derefable, new)]
pub struct Extent(#[deref] genome::Interval);

impl Extent {
    /// Decide whether this extent perturbs the half-open window
    /// `[start, end)` on the given contig. Empty extents affect nothing.
    pub fn affects(&self, contig: &str, start: u64, end: u64) -> bool {
        !self.is_empty()
            && self.contig() == contig
            && self.range().start < end
            && self.range().end > start
    }

    pub fn is_empty(&self) -> bool {
        self.range().start == self.range().end
    }
}
