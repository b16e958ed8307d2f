//! The container hierarchy: contigs hold site buckets keyed by offset,
//! genomes hold contigs keyed by name and populations hold genomes keyed by
//! sample name. All levels share record handles and expose the same
//! traversal, merge and filter surface.

pub mod bucket;
pub mod contig;
pub mod genome;
pub mod population;

pub use bucket::SiteBucket;
pub use contig::ContigStore;
pub use genome::GenomeStore;
pub use population::PopulationStore;

/// Signal returned by traversal callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Continue,
    Stop,
}
