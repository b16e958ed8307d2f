use crate::variants::record::VariantRecord;
use crate::variants::{Phase, VariantKind};

/// Record-granularity predicate tree.
///
/// Conjunction, disjunction and negation compose arbitrarily; the leaves
/// test one property of the canonical record each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Formula {
    Conjunction { operands: Vec<Box<Formula>> },
    Disjunction { operands: Vec<Box<Formula>> },
    Negation { operand: Box<Formula> },
    Atom(Predicate),
}

impl Formula {
    pub fn atom(predicate: Predicate) -> Formula {
        Formula::Atom(predicate)
    }

    pub fn and(operands: Vec<Formula>) -> Formula {
        Formula::Conjunction {
            operands: operands.into_iter().map(Box::new).collect(),
        }
    }

    pub fn or(operands: Vec<Formula>) -> Formula {
        Formula::Disjunction {
            operands: operands.into_iter().map(Box::new).collect(),
        }
    }

    pub fn not(operand: Formula) -> Formula {
        Formula::Negation {
            operand: Box::new(operand),
        }
    }

    pub fn matches(&self, record: &VariantRecord) -> bool {
        match self {
            Formula::Conjunction { operands } => {
                operands.iter().all(|operand| operand.matches(record))
            }
            Formula::Disjunction { operands } => {
                operands.iter().any(|operand| operand.matches(record))
            }
            Formula::Negation { operand } => !operand.matches(record),
            Formula::Atom(predicate) => predicate.matches(record),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Predicate {
    /// Kind of the canonical variant.
    Kind(VariantKind),
    Phase(Phase),
    Contig(String),
    /// Extent overlap with the half-open window `[start, end)` on `contig`.
    Region { contig: String, start: u64, end: u64 },
    /// The record carries an external identifier.
    Identified,
}

impl Predicate {
    pub fn matches(&self, record: &VariantRecord) -> bool {
        match self {
            Predicate::Kind(kind) => record.kind() == *kind,
            Predicate::Phase(phase) => record.phase() == *phase,
            Predicate::Contig(contig) => record.contig() == contig,
            Predicate::Region { contig, start, end } => {
                record.extent().affects(contig, *start, *end)
            }
            Predicate::Identified => record.identifier().is_some(),
        }
    }
}
