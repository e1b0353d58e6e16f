use crate::error::{Error, Result};
use crate::object::Value;
use crate::types::Registry;

use super::Dictionary;

/// Elements of a value grouped by the distinct elements of a key
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub key: Value,
    pub val: Vec<Value>,
}

impl Registry {
    /// Group the elements of `x` by the matching elements of `by`
    ///
    /// Groups appear in order of first occurrence in `by`; within a group,
    /// elements keep their original order.
    ///
    pub fn split(&self, x: &Value, by: &Value) -> Result<Split> {
        let (n, m) = (x.size()?, by.size()?);
        if n != m {
            return Err(Error::IncompatibleSize(n, m));
        }

        let p = self.equality_proxy(by)?;
        let (dict, groups) = Dictionary::build(&p);

        let mut indices = vec![vec![]; dict.len()];
        for (i, g) in groups.into_iter().enumerate() {
            indices[g].push(i);
        }

        Ok(Split {
            key: by.subset(dict.keys())?,
            val: indices
                .iter()
                .map(|i| x.subset(i))
                .collect::<Result<Vec<_>>>()?,
        })
    }
}

pub fn split(x: &Value, by: &Value) -> Result<Split> {
    Registry::global().split(x, by)
}
