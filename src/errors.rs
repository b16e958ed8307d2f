use bio_types::genome::Locus;

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("empty reference allele at {locus:?}; ingestion must provide at least the anchor base")]
    EmptyRefAllele { locus: Locus },
    #[error("empty alternate allele at {locus:?}; deletions must keep the anchor base")]
    EmptyAltAllele { locus: Locus },
    #[error("allele symbol '{symbol}' is not a valid nucleotide, must be A, C, G, T or N")]
    InvalidAlleleSymbol { symbol: char },
    #[error("variant record is missing required field {field}")]
    MissingField { field: String },
    #[error("record at {locus:?} does not belong to the store for contig {contig}")]
    ContigMismatch { contig: String, locus: Locus },
    #[error("undefined view {name}; please define it under 'views:' in your filter configuration")]
    UndefinedView { name: String },
}

impl From<derive_builder::UninitializedFieldError> for Error {
    fn from(err: derive_builder::UninitializedFieldError) -> Self {
        Error::MissingField {
            field: err.field_name().to_owned(),
        }
    }
}

pub(crate) fn contig_mismatch(contig: &str, record_contig: &str, offset: u64) -> Error {
    Error::ContigMismatch {
        contig: contig.to_owned(),
        locus: Locus::new(record_contig.to_owned(), offset),
    }
}
