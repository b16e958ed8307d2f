// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::sync::Arc;

use counter::Counter;
use itertools::Itertools;

use crate::store::bucket::SiteBucket;
use crate::variants::record::VariantRecord;

/// Whole-bucket policies deciding which records of one site survive.
///
/// Policies form a closed set; record-granularity conditions are expressed
/// as predicate formulas instead of callbacks, so every filter stays
/// serializable.
#[derive(
    Display,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
pub enum SiteFilter {
    /// Keep the bucket only if it holds at most two records, as expected of
    /// a clean diploid call set. Overfull buckets are emptied.
    #[strum(serialize = "diploid")]
    Diploid,
    /// Keep records whose phase-blind variant occurs at least twice in the
    /// bucket.
    #[strum(serialize = "homozygous")]
    Homozygous,
    /// Keep records whose phase-blind variant occurs exactly once in the
    /// bucket.
    #[strum(serialize = "heterozygous")]
    Heterozygous,
    /// Keep the first record per phase-blind variant.
    #[strum(serialize = "unique-unphased")]
    UniqueUnphased,
    /// Keep the first record per phase-aware variant.
    #[strum(serialize = "unique-phased")]
    UniquePhased,
}

impl SiteFilter {
    /// Apply the policy to one bucket. The empty bucket is valid input and
    /// yields an empty bucket.
    pub fn apply(&self, bucket: &SiteBucket) -> SiteBucket {
        match self {
            SiteFilter::Diploid => {
                if bucket.variant_count() <= 2 {
                    bucket.clone()
                } else {
                    SiteBucket::default()
                }
            }
            SiteFilter::Homozygous => by_group_size(bucket, |count| count >= 2),
            SiteFilter::Heterozygous => by_group_size(bucket, |count| count == 1),
            SiteFilter::UniqueUnphased => unique_by_key(bucket, |rec| rec.phase_blind_hash()),
            SiteFilter::UniquePhased => unique_by_key(bucket, |rec| rec.phase_aware_hash()),
        }
    }
}

fn by_group_size<P>(bucket: &SiteBucket, keep: P) -> SiteBucket
where
    P: Fn(usize) -> bool,
{
    let counts: Counter<String> = bucket.iter().map(|rec| rec.phase_blind_hash()).collect();
    SiteBucket::from_records(
        bucket
            .iter()
            .filter(|rec| keep(counts.get(&rec.phase_blind_hash()).copied().unwrap_or(0)))
            .cloned()
            .collect_vec(),
    )
}

fn unique_by_key<F>(bucket: &SiteBucket, key: F) -> SiteBucket
where
    F: Fn(&Arc<VariantRecord>) -> String,
{
    SiteBucket::from_records(bucket.iter().unique_by(|rec| key(rec)).cloned().collect_vec())
}
