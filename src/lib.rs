// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! An in-memory, read-mostly store for genomic variant calls at population
//! scale. Variant records are immutable and shared by handle between sites,
//! contigs, genomes and populations; filtering and set algebra operate on
//! those shared handles without copying record payloads.

#[macro_use]
extern crate derefable;
#[macro_use]
extern crate derive_builder;
#[macro_use]
extern crate derive_new;
#[macro_use]
extern crate getset;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate strum_macros;

pub mod errors;
pub mod filters;
pub mod store;
pub mod variants;

pub use crate::filters::{Filter, FilterConfig, FilterTally, Formula, Predicate, SiteFilter};
pub use crate::store::{ContigStore, GenomeStore, PopulationStore, SiteBucket, Visit};
pub use crate::variants::record::{VariantRecord, VariantRecordBuilder};
pub use crate::variants::{Evidence, EvidenceValue, Extent, Phase, VariantKind};
