use std::sync::Arc;

use varpop::{Phase, PopulationStore, VariantRecord, VariantRecordBuilder, Visit};

pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub(crate) fn record(
    contig: &str,
    offset: u64,
    ref_allele: &[u8],
    alt_allele: &[u8],
    phase: Phase,
) -> Arc<VariantRecord> {
    Arc::new(
        VariantRecordBuilder::default()
            .contig(contig.to_owned())
            .offset(offset)
            .phase(phase)
            .ref_allele(ref_allele)
            .alt_allele(alt_allele)
            .build()
            .unwrap(),
    )
}

/// Three samples over two contigs. sample1 is homozygous at chr1:100,
/// sample2 shares one of those haplotype records by handle, sample3 holds an
/// insertion and a deletion on chr2.
pub(crate) fn cohort() -> (PopulationStore, Arc<VariantRecord>) {
    let shared = record("chr1", 100, b"G", b"T", Phase::DiploidA);
    let mut population = PopulationStore::new();
    population.insert("sample1", Arc::clone(&shared));
    population.insert(
        "sample1",
        record("chr1", 100, b"G", b"T", Phase::DiploidB),
    );
    population.insert("sample2", Arc::clone(&shared));
    population.insert("sample2", record("chr2", 5, b"C", b"A", Phase::Unphased));
    population.insert("sample3", record("chr2", 7, b"A", b"AGG", Phase::Haploid));
    population.insert("sample3", record("chr2", 20, b"TAC", b"TA", Phase::Haploid));
    (population, shared)
}

pub(crate) fn all_hashes(population: &PopulationStore) -> Vec<String> {
    let mut hashes = Vec::new();
    population.for_each_variant(|rec| {
        hashes.push(rec.phase_aware_hash());
        Visit::Continue
    });
    hashes
}
