use crate::coercion::CastContext;
use crate::error::{Error, Result};
use crate::object::{Logical, Value};
use crate::types::Registry;

impl Registry {
    /// Element-wise equality
    ///
    /// Both sides are first cast to their common type. A side of size one is
    /// recycled against the other; any other size mismatch is an error.
    ///
    /// When `missing_equal` is set, missing values compare equal to each
    /// other and unequal to everything else. Otherwise a comparison touching
    /// a missing value is unknown (`NA`), unless some other field of a record
    /// already differs.
    ///
    pub fn equal(&self, x: &Value, y: &Value, missing_equal: bool) -> Result<Vec<Logical>> {
        let values = self.cast_common(&[x.clone(), y.clone()], None, &CastContext::new())?;
        let (px, py) = (
            self.equality_proxy(&values[0])?,
            self.equality_proxy(&values[1])?,
        );

        let (n, m) = (px.size(), py.size());
        let size = match (n, m) {
            (n, m) if n == m => n,
            (1, m) => m,
            (n, 1) => n,
            (n, m) => return Err(Error::IncompatibleSize(m, n)),
        };

        Ok((0..size)
            .map(|k| {
                let (i, j) = (if n == 1 { 0 } else { k }, if m == 1 { 0 } else { k });
                if missing_equal {
                    Logical::Some(px.equal_rows(i, &py, j))
                } else {
                    px.equal_rows_propagate(i, &py, j)
                }
            })
            .collect())
    }

    /// Which elements are missing
    ///
    /// A record row is missing only when every one of its fields is. List
    /// elements are missing where they are `NULL`; raw vectors have no
    /// missing elements.
    ///
    pub fn equal_missing(&self, x: &Value) -> Result<Vec<bool>> {
        let p = self.equality_proxy(x)?;
        Ok((0..p.size()).map(|i| p.is_missing(i)).collect())
    }
}

/// Element-wise equality using the process-wide registry
pub fn equal(x: &Value, y: &Value, missing_equal: bool) -> Result<Vec<Logical>> {
    Registry::global().equal(x, y, missing_equal)
}

/// Missing elements using the process-wide registry
pub fn equal_missing(x: &Value) -> Result<Vec<bool>> {
    Registry::global().equal_missing(x)
}
