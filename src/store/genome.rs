use std::collections::BTreeMap;
use std::sync::Arc;

use crate::filters::{Filter, FilterTally};
use crate::store::contig::ContigStore;
use crate::store::Visit;
use crate::variants::record::VariantRecord;

/// All variant calls of one sampled genome, keyed by contig.
#[derive(Debug, Clone, Getters)]
pub struct GenomeStore {
    /// Sample name of the genome this store represents.
    #[getset(get = "pub")]
    name: String,
    contigs: BTreeMap<String, ContigStore>,
}

impl GenomeStore {
    pub fn new(name: String) -> Self {
        GenomeStore {
            name,
            contigs: BTreeMap::new(),
        }
    }

    /// Contig store for the given contig, created empty if absent. Never
    /// fails.
    pub fn get_or_create_contig(&mut self, contig: &str) -> &mut ContigStore {
        self.contigs
            .entry(contig.to_owned())
            .or_insert_with(|| ContigStore::new(contig.to_owned()))
    }

    pub fn contig(&self, contig: &str) -> Option<&ContigStore> {
        self.contigs.get(contig)
    }

    pub fn contigs(&self) -> impl Iterator<Item = &ContigStore> {
        self.contigs.values()
    }

    pub fn contig_count(&self) -> usize {
        self.contigs.len()
    }

    pub fn variant_count(&self) -> usize {
        self.contigs.values().map(ContigStore::variant_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.variant_count() == 0
    }

    /// Insert a record handle, routed to the contig it is anchored on.
    pub fn insert(&mut self, record: Arc<VariantRecord>) {
        self.get_or_create_contig(record.contig()).insert(record);
    }

    /// Copy all record handles of `other` into this store, contig by contig.
    /// `other` is left untouched.
    pub fn merge_from(&mut self, other: &GenomeStore) {
        for (id, contig) in &other.contigs {
            self.get_or_create_contig(id).merge_from(contig);
        }
    }

    /// Visit every record, contigs in lexicographic order, offsets ascending
    /// within each contig.
    pub fn for_each_variant<F>(&self, mut f: F) -> Visit
    where
        F: FnMut(&Arc<VariantRecord>) -> Visit,
    {
        for contig in self.contigs.values() {
            if let Visit::Stop = contig.for_each_variant(&mut f) {
                return Visit::Stop;
            }
        }
        Visit::Continue
    }

    /// Pure filtering: a fresh genome holding the surviving record handles.
    /// Contigs left without records are dropped.
    pub fn view_filter(&self, filter: &Filter) -> GenomeStore {
        let mut out = GenomeStore::new(self.name.clone());
        for (id, contig) in &self.contigs {
            let kept = contig.view_filter(filter);
            if !kept.is_empty() {
                out.contigs.insert(id.clone(), kept);
            }
        }
        out
    }

    /// In-place filtering; emptied contigs are removed. Returns the summed
    /// per-contig tallies.
    pub fn self_filter(&mut self, filter: &Filter) -> FilterTally {
        let mut tally = FilterTally::default();
        for contig in self.contigs.values_mut() {
            tally.merge(&contig.self_filter(filter));
        }
        self.contigs.retain(|_, contig| !contig.is_empty());
        tally
    }

    /// Remove and return one contig subtree, releasing its record handles
    /// from this genome.
    pub fn release_contig(&mut self, contig: &str) -> Option<ContigStore> {
        let released = self.contigs.remove(contig);
        if let Some(ref store) = released {
            debug!(
                "released contig {} with {} records from genome {}",
                contig,
                store.variant_count(),
                self.name
            );
        }
        released
    }

    /// Drop all contigs, releasing every record handle this genome holds.
    pub fn clear(&mut self) {
        debug!(
            "clearing genome {} with {} records",
            self.name,
            self.variant_count()
        );
        self.contigs.clear();
    }

    /// Contig-wise set union under phase-aware equality. The result carries
    /// this store's name.
    pub fn union(&self, other: &GenomeStore) -> GenomeStore {
        let mut out = GenomeStore::new(self.name.clone());
        for (id, contig) in &self.contigs {
            let united = match other.contigs.get(id) {
                Some(other_contig) => contig.union(other_contig),
                None => contig.as_set(),
            };
            if !united.is_empty() {
                out.contigs.insert(id.clone(), united);
            }
        }
        for (id, contig) in &other.contigs {
            if !self.contigs.contains_key(id) && !contig.is_empty() {
                out.contigs.insert(id.clone(), contig.as_set());
            }
        }
        out
    }

    /// Contig-wise set intersection under phase-aware equality.
    pub fn intersection(&self, other: &GenomeStore) -> GenomeStore {
        let mut out = GenomeStore::new(self.name.clone());
        for (id, contig) in &self.contigs {
            if let Some(other_contig) = other.contigs.get(id) {
                let shared = contig.intersection(other_contig);
                if !shared.is_empty() {
                    out.contigs.insert(id.clone(), shared);
                }
            }
        }
        out
    }

    /// Contig-wise set difference under phase-aware equality.
    pub fn difference(&self, other: &GenomeStore) -> GenomeStore {
        let mut out = GenomeStore::new(self.name.clone());
        for (id, contig) in &self.contigs {
            let remaining = match other.contigs.get(id) {
                Some(other_contig) => contig.difference(other_contig),
                None => contig.as_set(),
            };
            if !remaining.is_empty() {
                out.contigs.insert(id.clone(), remaining);
            }
        }
        out
    }

    /// Membership under phase-aware equality, routed by the probe's contig.
    pub fn is_element(&self, record: &VariantRecord) -> bool {
        self.contig(record.contig())
            .map_or(false, |contig| contig.is_element(record))
    }
}
