use std::convert::TryFrom;
use std::sync::Arc;
use std::thread;

use varpop::{
    Filter, FilterConfig, Formula, Phase, PopulationStore, Predicate, SiteFilter, VariantKind,
    Visit,
};

mod common;

use common::{all_hashes, cohort, init_logger, record};

#[test]
fn test_cohort_counts_and_traversal_order() {
    init_logger();
    let (population, _) = cohort();
    assert_eq!(population.genome_count(), 3);
    assert_eq!(population.variant_count(), 6);
    assert_eq!(
        all_hashes(&population),
        vec![
            "chr1:100:G>T:A",
            "chr1:100:G>T:B",
            "chr1:100:G>T:A",
            "chr2:5:C>A",
            "chr2:8:>GG:H",
            "chr2:22:C>:H",
        ]
    );
}

#[test]
fn test_traversal_stops_across_genome_boundaries() {
    let (population, _) = cohort();
    let mut seen = 0;
    let outcome = population.for_each_variant(|_| {
        seen += 1;
        if seen == 3 {
            Visit::Stop
        } else {
            Visit::Continue
        }
    });
    assert_eq!(outcome, Visit::Stop);
    assert_eq!(seen, 3);
}

#[test]
fn test_records_are_shared_by_handle_not_copied() {
    let (population, shared) = cohort();
    // the same payload is reachable from two genomes
    let in_sample1 = &population.genome("sample1").unwrap().contig("chr1").unwrap()
        .site(100)
        .unwrap()
        .variants()[0];
    let in_sample2 = &population.genome("sample2").unwrap().contig("chr1").unwrap()
        .site(100)
        .unwrap()
        .variants()[0];
    assert!(Arc::ptr_eq(in_sample1, &shared));
    assert!(Arc::ptr_eq(in_sample2, &shared));

    // merging another cohort adds handles, not payload copies
    let mut merged = PopulationStore::new();
    merged.merge_from(&population);
    let in_merged = &merged.genome("sample1").unwrap().contig("chr1").unwrap()
        .site(100)
        .unwrap()
        .variants()[0];
    assert!(Arc::ptr_eq(in_merged, &shared));
}

#[test]
fn test_release_genome_frees_unshared_records() {
    let (mut population, shared) = cohort();
    let only_in_sample3 = Arc::downgrade(
        &population.genome("sample3").unwrap().contig("chr2").unwrap()
            .site(7)
            .unwrap()
            .variants()[0],
    );

    let released = population.release_genome("sample3").unwrap();
    assert_eq!(released.variant_count(), 2);
    // the subtree keeps its records alive until it is dropped
    assert!(only_in_sample3.upgrade().is_some());
    drop(released);
    assert!(only_in_sample3.upgrade().is_none());

    // a record shared with another genome survives releasing one of them
    let shared_weak = Arc::downgrade(&shared);
    drop(shared);
    drop(population.release_genome("sample1"));
    assert!(shared_weak.upgrade().is_some());
    population.clear();
    assert!(shared_weak.upgrade().is_none());
}

#[test]
fn test_view_filter_is_pure_and_self_filter_is_equivalent() {
    let composite = Filter::All(vec![
        Filter::Site(SiteFilter::UniquePhased),
        Filter::Records(Formula::not(Formula::atom(Predicate::Kind(
            VariantKind::Insertion,
        )))),
    ]);

    let (mut population, _) = cohort();
    let view = population.view_filter(&composite);
    // the source is untouched by the pure mode
    assert_eq!(population.variant_count(), 6);

    let tally = population.self_filter(&composite);
    assert_eq!(tally.accepted() + tally.rejected(), 6);
    assert_eq!(all_hashes(&population), all_hashes(&view));
    assert_eq!(population.variant_count(), tally.accepted());
    // cohort membership is unchanged by filtering
    assert_eq!(population.genome_count(), 3);
}

#[test]
fn test_zygosity_views_partition_diploid_sites() {
    let (population, _) = cohort();
    let homozygous = population.view_filter(&Filter::Site(SiteFilter::Homozygous));
    let heterozygous = population.view_filter(&Filter::Site(SiteFilter::Heterozygous));
    // sample1 is homozygous at chr1:100
    assert_eq!(homozygous.genome("sample1").unwrap().variant_count(), 2);
    assert_eq!(heterozygous.genome("sample1").unwrap().variant_count(), 0);
    // sample2 and sample3 sites are all singletons
    assert_eq!(homozygous.genome("sample2").unwrap().variant_count(), 0);
    assert_eq!(heterozygous.genome("sample2").unwrap().variant_count(), 2);
    // the two views partition every bucket
    assert_eq!(
        homozygous.variant_count() + heterozygous.variant_count(),
        population.variant_count()
    );
}

#[test]
fn test_genome_set_algebra_laws() {
    let (population, _) = cohort();
    let sample1 = population.genome("sample1").unwrap();
    let sample2 = population.genome("sample2").unwrap();

    let union = sample1.union(sample2);
    // shared handle dedupes to one member
    assert_eq!(union.variant_count(), 3);
    let intersection = sample1.intersection(sample2);
    assert_eq!(intersection.variant_count(), 1);
    assert!(intersection.is_element(&record("chr1", 100, b"G", b"T", Phase::DiploidA)));

    let difference = sample1.difference(sample2);
    assert_eq!(difference.variant_count(), 1);
    assert!(difference.is_element(&record("chr1", 100, b"G", b"T", Phase::DiploidB)));

    // laws on duplicate-free stores
    assert_eq!(
        all_of(&union.union(&union)),
        all_of(&union)
    );
    assert_eq!(
        all_of(&sample1.intersection(&union)),
        all_of(sample1)
    );
    assert!(sample1.difference(sample1).is_empty());

    // membership distributes over union
    let probe = record("chr2", 5, b"C", b"A", Phase::Unphased);
    assert_eq!(
        union.is_element(&probe),
        sample1.is_element(&probe) || sample2.is_element(&probe)
    );
}

fn all_of(genome: &varpop::GenomeStore) -> Vec<String> {
    let mut hashes = Vec::new();
    genome.for_each_variant(|rec| {
        hashes.push(rec.phase_aware_hash());
        Visit::Continue
    });
    hashes
}

#[test]
fn test_nulled_placeholders_flow_through_filters() {
    let (mut population, shared) = cohort();
    let placeholder = Arc::new(shared.nulled_to_reference());
    population.insert("sample2", Arc::clone(&placeholder));

    let references = population.view_filter(&Filter::Records(Formula::atom(Predicate::Kind(
        VariantKind::Reference,
    ))));
    assert_eq!(references.variant_count(), 1);
    let kept = &references.genome("sample2").unwrap().contig("chr1").unwrap()
        .site(100)
        .unwrap()
        .variants()[0];
    assert!(Arc::ptr_eq(kept, &placeholder));
}

#[test]
fn test_filter_config_drives_population_views() {
    let yaml = r#"
views:
  clean-diploid:
    all:
      - site: unique-phased
      - site: diploid
  chr2-window:
    records:
      conjunction:
        operands:
          - atom:
              contig: chr2
          - atom:
              region:
                contig: chr2
                start: 0
                end: 10
"#;
    let config = FilterConfig::try_from(yaml).unwrap();
    let (population, _) = cohort();

    let clean = population.view_filter(config.view("clean-diploid").unwrap());
    // every site already is a clean diploid call, so nothing is rejected
    assert_eq!(clean.genome("sample1").unwrap().variant_count(), 2);
    assert_eq!(clean.variant_count(), 6);

    let windowed = population.view_filter(config.view("chr2-window").unwrap());
    assert_eq!(
        all_hashes(&windowed),
        vec!["chr2:5:C>A", "chr2:8:>GG:H"]
    );

    assert!(config.view("missing").is_err());
}

#[test]
fn test_concurrent_read_only_traversal() {
    let (population, _) = cohort();
    let population = Arc::new(population);
    let mut handles = Vec::new();
    for _ in 0..4 {
        let population = Arc::clone(&population);
        handles.push(thread::spawn(move || {
            let mut count = 0;
            population.for_each_variant(|_| {
                count += 1;
                Visit::Continue
            });
            count
        }));
    }
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 6);
    }
}

#[test]
fn test_stores_and_records_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<varpop::VariantRecord>();
    assert_send_sync::<varpop::SiteBucket>();
    assert_send_sync::<varpop::ContigStore>();
    assert_send_sync::<varpop::GenomeStore>();
    assert_send_sync::<PopulationStore>();
}
