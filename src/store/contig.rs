// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use itertools::Itertools;

use crate::errors;
use crate::filters::{Filter, FilterTally};
use crate::store::bucket::SiteBucket;
use crate::store::Visit;
use crate::variants::record::VariantRecord;

/// All variant sites of one contig, keyed by the records' stored offsets.
///
/// Buckets are keyed by the anchored (stored) offset; matching and set
/// algebra always compare canonically, so equivalent records behind
/// different anchors are still related. The BTreeMap keeps traversal order
/// deterministic.
#[derive(Debug, Clone, Getters)]
pub struct ContigStore {
    /// Contig all contained records are anchored on.
    #[getset(get = "pub")]
    contig: String,
    sites: BTreeMap<u64, SiteBucket>,
}

impl ContigStore {
    pub fn new(contig: String) -> Self {
        ContigStore {
            contig,
            sites: BTreeMap::new(),
        }
    }

    pub fn get_or_create_site(&mut self, offset: u64) -> &mut SiteBucket {
        self.sites.entry(offset).or_default()
    }

    pub fn site(&self, offset: u64) -> Option<&SiteBucket> {
        self.sites.get(&offset)
    }

    pub fn sites(&self) -> impl Iterator<Item = (u64, &SiteBucket)> {
        self.sites.iter().map(|(offset, bucket)| (*offset, bucket))
    }

    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    pub fn variant_count(&self) -> usize {
        self.sites.values().map(SiteBucket::variant_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.variant_count() == 0
    }

    pub(crate) fn records(&self) -> impl Iterator<Item = &Arc<VariantRecord>> {
        self.sites.values().flat_map(|bucket| bucket.iter())
    }

    /// Insert a record handle, anchoring it at its stored offset.
    ///
    /// Inserting a record of a foreign contig is a contract violation: it is
    /// logged, fatal in debug builds, and otherwise leaves the store
    /// unchanged.
    pub fn insert(&mut self, record: Arc<VariantRecord>) {
        if record.contig() != &self.contig {
            let err = errors::contig_mismatch(&self.contig, record.contig(), record.offset());
            error!("{}", err);
            debug_assert!(false, "{}", err);
            return;
        }
        self.get_or_create_site(record.offset()).insert(record);
    }

    /// Copy all record handles of `other` into this store. Buckets are
    /// concatenated, so multiplicity is preserved and payloads stay shared.
    /// `other` is left untouched.
    pub fn merge_from(&mut self, other: &ContigStore) {
        if !self.check_same_contig(other, "merge") {
            return;
        }
        for (offset, bucket) in &other.sites {
            let target = self.sites.entry(*offset).or_default();
            for record in bucket.iter() {
                target.insert(Arc::clone(record));
            }
        }
    }

    /// Buckets whose stored offset falls into the half-open window
    /// `[start, end)`, in ascending offset order.
    pub fn range(&self, start: u64, end: u64) -> impl Iterator<Item = (u64, &SiteBucket)> {
        self.sites
            .range(start..end)
            .map(|(offset, bucket)| (*offset, bucket))
    }

    /// Visit every record in ascending offset order. Traversal only needs
    /// `&self`, so no mutation can happen underneath it.
    pub fn for_each_variant<F>(&self, mut f: F) -> Visit
    where
        F: FnMut(&Arc<VariantRecord>) -> Visit,
    {
        for bucket in self.sites.values() {
            for record in bucket.iter() {
                if let Visit::Stop = f(record) {
                    return Visit::Stop;
                }
            }
        }
        Visit::Continue
    }

    /// Pure filtering: a fresh store holding the surviving record handles.
    /// Empty buckets are dropped.
    pub fn view_filter(&self, filter: &Filter) -> ContigStore {
        let mut out = ContigStore::new(self.contig.clone());
        for (offset, bucket) in &self.sites {
            let kept = filter.apply(bucket);
            if !kept.is_empty() {
                out.sites.insert(*offset, kept);
            }
        }
        out
    }

    /// In-place filtering: rejected handles are dropped, emptied buckets
    /// removed. Returns how many records were kept and rejected.
    pub fn self_filter(&mut self, filter: &Filter) -> FilterTally {
        let mut tally = FilterTally::default();
        let mut drained = Vec::new();
        for (offset, bucket) in self.sites.iter_mut() {
            let kept = filter.apply(bucket);
            tally.tally(
                kept.variant_count(),
                bucket.variant_count() - kept.variant_count(),
            );
            if kept.is_empty() {
                drained.push(*offset);
            }
            *bucket = kept;
        }
        for offset in drained {
            self.sites.remove(&offset);
        }
        tally
    }

    /// Records present in `self` or `other`, as a set under phase-aware
    /// equality.
    pub fn union(&self, other: &ContigStore) -> ContigStore {
        if !self.check_same_contig(other, "unite") {
            return self.as_set();
        }
        self.set_from(
            self.records()
                .chain(other.records())
                .cloned()
                .collect_vec(),
        )
    }

    /// Records present in both stores, as a set under phase-aware equality.
    pub fn intersection(&self, other: &ContigStore) -> ContigStore {
        if !self.check_same_contig(other, "intersect") {
            return ContigStore::new(self.contig.clone());
        }
        let members: HashSet<&VariantRecord> =
            other.records().map(|record| record.as_ref()).collect();
        self.set_from(
            self.records()
                .filter(|record| members.contains(record.as_ref()))
                .cloned()
                .collect_vec(),
        )
    }

    /// Records present in `self` but not in `other`, as a set under
    /// phase-aware equality.
    pub fn difference(&self, other: &ContigStore) -> ContigStore {
        if !self.check_same_contig(other, "subtract") {
            return self.as_set();
        }
        let members: HashSet<&VariantRecord> =
            other.records().map(|record| record.as_ref()).collect();
        self.set_from(
            self.records()
                .filter(|record| !members.contains(record.as_ref()))
                .cloned()
                .collect_vec(),
        )
    }

    /// Membership under phase-aware equality. The probe's anchor
    /// representation does not matter.
    pub fn is_element(&self, record: &VariantRecord) -> bool {
        let mut found = false;
        self.for_each_variant(|candidate| {
            if candidate.is_equivalent(record) {
                found = true;
                Visit::Stop
            } else {
                Visit::Continue
            }
        });
        found
    }

    /// This store with duplicates collapsed, records sorted.
    pub(crate) fn as_set(&self) -> ContigStore {
        self.set_from(self.records().cloned().collect_vec())
    }

    fn set_from(&self, mut records: Vec<Arc<VariantRecord>>) -> ContigStore {
        records.sort();
        records.dedup();
        let mut out = ContigStore::new(self.contig.clone());
        for record in records {
            out.get_or_create_site(record.offset()).insert(record);
        }
        out
    }

    fn check_same_contig(&self, other: &ContigStore, operation: &str) -> bool {
        if other.contig == self.contig {
            return true;
        }
        error!(
            "cannot {} store for contig {} with store for contig {}",
            operation, self.contig, other.contig
        );
        debug_assert!(
            false,
            "{} called across contigs {} and {}",
            operation, self.contig, other.contig
        );
        false
    }
}
