use std::collections::HashMap;

/// Opaque per-record annotation payload.
///
/// The store forwards evidence verbatim and never interprets it. Ingestion
/// decides which tags to attach and downstream consumers decide what they
/// mean.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evidence {
    values: HashMap<Vec<u8>, EvidenceValue>,
}

impl Evidence {
    pub fn insert(&mut self, field: &[u8], value: EvidenceValue) {
        self.values.insert(field.to_owned(), value);
    }

    pub fn get(&self, field: &[u8]) -> Option<&EvidenceValue> {
        self.values.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &Vec<u8>> {
        self.values.keys()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EvidenceValue {
    Integer(Vec<i32>),
    Float(Vec<f32>),
    String(Vec<Vec<u8>>),
    Flag(bool),
}
