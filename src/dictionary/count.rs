use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::object::Value;
use crate::types::{ptype_of, Registry};

use super::Dictionary;

/// Row order of a [`Count`] table
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum CountOrder {
    /// Descending count, ties broken by first occurrence
    #[default]
    Count,
    /// Ascending key, missing keys last
    Key,
    /// First occurrence
    Location,
    /// Whatever order grouping produced
    None,
}

/// Occurrences of each distinct element
#[derive(Debug, Clone, PartialEq)]
pub struct Count {
    pub key: Value,
    pub count: Vec<usize>,
}

impl Registry {
    pub fn count(&self, x: &Value, order: CountOrder) -> Result<Count> {
        let p = self.equality_proxy(x)?;
        let (dict, groups) = Dictionary::build(&p);

        let mut counts = vec![0usize; dict.len()];
        for g in groups {
            counts[g] += 1;
        }

        let mut rows: Vec<usize> = (0..dict.len()).collect();
        let keys = dict.keys();
        match order {
            CountOrder::Count => rows.sort_by(|&a, &b| counts[b].cmp(&counts[a])),
            CountOrder::Key => {
                if !p.is_orderable() {
                    return Err(Error::Unsupported(ptype_of(x).to_string(), "count"));
                }
                rows.sort_by(|&a, &b| {
                    p.cmp_rows(keys[a], keys[b]).unwrap_or(Ordering::Equal)
                });
            }
            CountOrder::Location | CountOrder::None => (),
        }

        tracing::trace!(groups = rows.len(), %order, "counted");

        let locations: Vec<usize> = rows.iter().map(|&g| keys[g]).collect();
        Ok(Count {
            key: x.subset(&locations)?,
            count: rows.iter().map(|&g| counts[g]).collect(),
        })
    }
}

pub fn count(x: &Value, order: CountOrder) -> Result<Count> {
    Registry::global().count(x, order)
}
