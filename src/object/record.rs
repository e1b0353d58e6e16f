use std::sync::Arc;

use crate::err;
use crate::error::Result;

use super::Value;

/// Ordered, named, equal-size fields
///
/// Records are the tabular kind: every field is a vector of the same size,
/// and that size is the size of the record. A record may have no fields and
/// still have rows.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    fields: Arc<Vec<(String, Value)>>,
    size: usize,
}

impl Record {
    /// Build a record, taking its size from the first field
    pub fn new(fields: Vec<(String, Value)>) -> Result<Record> {
        let size = match fields.first() {
            Some((_, v)) => v.size()?,
            None => 0,
        };
        Record::with_size(fields, size)
    }

    /// Build a record of an explicit size
    ///
    /// Fails when a field is not a vector of that size, or when field names
    /// are repeated.
    ///
    pub fn with_size(fields: Vec<(String, Value)>, size: usize) -> Result<Record> {
        for (i, (name, value)) in fields.iter().enumerate() {
            if fields[..i].iter().any(|(n, _)| n == name) {
                return Err(err!(format!("field names must be unique, '{name}' is repeated")));
            }

            if matches!(value, Value::Null) {
                return Err(err!(format!("field '{name}' must be a vector, not NULL")));
            }

            let n = value.size()?;
            if n != size {
                return Err(err!(format!(
                    "field '{name}' has size {n} but the record has size {size}"
                )));
            }
        }

        Ok(Record {
            fields: Arc::new(fields),
            size,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn subset(&self, indices: &[usize]) -> Result<Record> {
        let fields = self
            .fields
            .iter()
            .map(|(n, v)| Ok((n.clone(), v.subset(indices)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Record {
            fields: Arc::new(fields),
            size: indices.len(),
        })
    }
}
