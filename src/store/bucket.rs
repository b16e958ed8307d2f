use std::sync::Arc;

use crate::variants::record::VariantRecord;

/// All records anchored at one reference offset of one contig.
///
/// A bucket is a multiset: the same variant may be recorded any number of
/// times (once per supporting genome copy, or repeatedly by duplicate
/// ingestion), and insertion order is preserved. Deduplication is the job of
/// the unique filters and of set algebra, never of insertion.
#[derive(Debug, Clone, Default, Derefable)]
pub struct SiteBucket {
    #[deref]
    records: Vec<Arc<VariantRecord>>,
}

impl SiteBucket {
    pub(crate) fn from_records(records: Vec<Arc<VariantRecord>>) -> Self {
        SiteBucket { records }
    }

    pub fn insert(&mut self, record: Arc<VariantRecord>) {
        self.records.push(record);
    }

    pub fn variants(&self) -> &[Arc<VariantRecord>] {
        &self.records
    }

    pub fn variant_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record that is phase-blind equal to the probe, if any. The
    /// probe's own phase and anchor representation are irrelevant.
    pub fn find_matching_canonical(&self, probe: &VariantRecord) -> Option<&Arc<VariantRecord>> {
        self.records.iter().find(|rec| rec.is_analogous(probe))
    }
}
