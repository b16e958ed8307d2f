// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::BTreeMap;
use std::sync::Arc;

use rayon::prelude::*;

use crate::filters::{Filter, FilterTally};
use crate::store::genome::GenomeStore;
use crate::store::Visit;
use crate::variants::record::VariantRecord;

/// The whole cohort: one `GenomeStore` per sampled genome, keyed by sample
/// name.
///
/// Genome entries are cohort membership and survive filtering even when all
/// their records are rejected; membership only changes through
/// `get_or_create_genome`, `release_genome` and `clear`.
#[derive(Debug, Clone, Default)]
pub struct PopulationStore {
    genomes: BTreeMap<String, GenomeStore>,
}

impl PopulationStore {
    pub fn new() -> Self {
        PopulationStore::default()
    }

    /// Genome store for the given sample, created empty if absent. Never
    /// fails.
    pub fn get_or_create_genome(&mut self, name: &str) -> &mut GenomeStore {
        self.genomes
            .entry(name.to_owned())
            .or_insert_with(|| GenomeStore::new(name.to_owned()))
    }

    pub fn genome(&self, name: &str) -> Option<&GenomeStore> {
        self.genomes.get(name)
    }

    pub fn genomes(&self) -> impl Iterator<Item = &GenomeStore> {
        self.genomes.values()
    }

    pub fn genome_names(&self) -> impl Iterator<Item = &str> {
        self.genomes.keys().map(String::as_str)
    }

    pub fn genome_count(&self) -> usize {
        self.genomes.len()
    }

    pub fn variant_count(&self) -> usize {
        self.genomes.values().map(GenomeStore::variant_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.variant_count() == 0
    }

    /// Insert a record handle into the given sample's genome, creating the
    /// genome if needed.
    pub fn insert(&mut self, genome: &str, record: Arc<VariantRecord>) {
        self.get_or_create_genome(genome).insert(record);
    }

    /// Copy all record handles of `other` into this store, genome by genome.
    /// `other` is left untouched.
    pub fn merge_from(&mut self, other: &PopulationStore) {
        for (name, genome) in &other.genomes {
            self.get_or_create_genome(name).merge_from(genome);
        }
    }

    /// Visit every record of the cohort, genomes in lexicographic sample
    /// order.
    pub fn for_each_variant<F>(&self, mut f: F) -> Visit
    where
        F: FnMut(&Arc<VariantRecord>) -> Visit,
    {
        for genome in self.genomes.values() {
            if let Visit::Stop = genome.for_each_variant(&mut f) {
                return Visit::Stop;
            }
        }
        Visit::Continue
    }

    /// Hand every genome to `f` on a rayon worker. Workers only get
    /// `&GenomeStore`, so the traversal stays read-only.
    pub fn for_each_genome_par<F>(&self, f: F)
    where
        F: Fn(&GenomeStore) + Send + Sync,
    {
        self.genomes.par_iter().for_each(|(_, genome)| f(genome));
    }

    /// Pure filtering: a fresh population with every genome view-filtered.
    /// All genome entries survive; an all-rejected genome stays as an empty
    /// member.
    pub fn view_filter(&self, filter: &Filter) -> PopulationStore {
        let mut out = PopulationStore::new();
        for (name, genome) in &self.genomes {
            out.genomes.insert(name.clone(), genome.view_filter(filter));
        }
        out
    }

    /// In-place filtering across the cohort. Returns the summed tallies.
    pub fn self_filter(&mut self, filter: &Filter) -> FilterTally {
        let mut tally = FilterTally::default();
        for genome in self.genomes.values_mut() {
            tally.merge(&genome.self_filter(filter));
        }
        tally
    }

    /// Remove and return one genome subtree. This is the explicit way to
    /// reclaim the memory of a processed sample; records shared with other
    /// genomes stay alive through their handles.
    pub fn release_genome(&mut self, name: &str) -> Option<GenomeStore> {
        let released = self.genomes.remove(name);
        if let Some(ref genome) = released {
            debug!(
                "released genome {} with {} records from population",
                name,
                genome.variant_count()
            );
        }
        released
    }

    /// Drop the whole cohort.
    pub fn clear(&mut self) {
        debug!(
            "clearing population of {} genomes with {} records",
            self.genome_count(),
            self.variant_count()
        );
        self.genomes.clear();
    }
}
