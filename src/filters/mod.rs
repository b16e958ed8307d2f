//! Composable filters over site buckets, applicable at any store level in
//! two modes: `view_filter` builds a fresh store sharing the surviving
//! record handles, `self_filter` rewrites the store in place and reports a
//! tally.

use std::collections::BTreeMap;
use std::convert::TryFrom;

use anyhow::Result;

use crate::errors;
use crate::store::bucket::SiteBucket;

pub mod formula;
pub mod site;

pub use formula::{Formula, Predicate};
pub use site::SiteFilter;

/// A bucket-granularity filter. This is the closed set of filtering
/// behaviors the stores accept; record predicates go through `Records`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Filter {
    /// Apply a whole-bucket policy.
    Site(SiteFilter),
    /// Keep the records matching a predicate formula.
    Records(Formula),
    /// Apply the stages in order to each bucket; a record survives if it
    /// survives every stage.
    All(Vec<Filter>),
}

impl Filter {
    /// Apply to one bucket, yielding the surviving records in their
    /// original order. Never fails; empty buckets yield empty buckets.
    pub fn apply(&self, bucket: &SiteBucket) -> SiteBucket {
        match self {
            Filter::Site(policy) => policy.apply(bucket),
            Filter::Records(formula) => SiteBucket::from_records(
                bucket
                    .iter()
                    .filter(|rec| formula.matches(rec))
                    .cloned()
                    .collect(),
            ),
            Filter::All(stages) => {
                let mut current = bucket.clone();
                for stage in stages {
                    current = stage.apply(&current);
                    if current.is_empty() {
                        break;
                    }
                }
                current
            }
        }
    }
}

/// Outcome counts of an in-place filter pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct FilterTally {
    accepted: usize,
    rejected: usize,
}

impl FilterTally {
    pub(crate) fn tally(&mut self, accepted: usize, rejected: usize) {
        self.accepted += accepted;
        self.rejected += rejected;
    }

    pub fn merge(&mut self, other: &FilterTally) {
        self.accepted += other.accepted;
        self.rejected += other.rejected;
    }

    pub fn total(&self) -> usize {
        self.accepted + self.rejected
    }
}

/// Named filter views as pipelines declare them, typically in YAML:
///
/// ```yaml
/// views:
///   clean-diploid:
///     all:
///       - site: unique-phased
///       - site: diploid
///   rare-deletions:
///     records:
///       conjunction:
///         operands:
///           - atom:
///               kind: deletion
///           - negation:
///               operand:
///                 atom: identified
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[get = "pub"]
pub struct FilterConfig {
    views: BTreeMap<String, Filter>,
}

impl FilterConfig {
    /// Look up a named view. Unknown names are reported as an error naming
    /// the missing view.
    pub fn view(&self, name: &str) -> Result<&Filter> {
        self.views.get(name).ok_or_else(|| {
            errors::Error::UndefinedView {
                name: name.to_owned(),
            }
            .into()
        })
    }
}

impl<'a> TryFrom<&'a str> for FilterConfig {
    type Error = serde_yaml::Error;

    fn try_from(yaml: &str) -> Result<Self, Self::Error> {
        serde_yaml::from_str(yaml)
    }
}
