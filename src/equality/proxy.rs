use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::object::*;
use crate::types::{classify, KindTag, Registry};

use super::hash::*;

/// A flat primitive column of a comparison proxy
///
/// List columns hold the proxy of every element, with `None` where the
/// element is `NULL`.
///
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Logical(Vec<Logical>),
    Integer(Vec<Integer>),
    Double(Vec<Double>),
    Complex(Vec<Complex>),
    Character(Vec<Character>),
    Raw(Vec<Raw>),
    List(Vec<Option<Proxy>>),
}

/// Canonical comparison representation of a value
///
/// Atomic vectors and lists become a single column; records become one
/// column per leaf field, flattening nested records. A proxy owns its data
/// and lives only for the duration of one operation.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Proxy {
    size: usize,
    columns: Vec<Column>,
}

fn opt_equal<T, F>(x: &OptionNA<T>, y: &OptionNA<T>, f: F) -> bool
where
    F: Fn(&T, &T) -> bool,
{
    match (x, y) {
        (OptionNA::Some(x), OptionNA::Some(y)) => f(x, y),
        (OptionNA::NA, OptionNA::NA) => true,
        _ => false,
    }
}

fn opt_hash<T, F>(x: &OptionNA<T>, f: F) -> u64
where
    F: Fn(&T) -> u64,
{
    match x {
        OptionNA::Some(x) => f(x),
        OptionNA::NA => NA_HASH,
    }
}

// missing values order last
fn opt_cmp<T, F>(x: &OptionNA<T>, y: &OptionNA<T>, f: F) -> Ordering
where
    F: Fn(&T, &T) -> Ordering,
{
    match (x, y) {
        (OptionNA::Some(x), OptionNA::Some(y)) => f(x, y),
        (OptionNA::NA, OptionNA::NA) => Ordering::Equal,
        (OptionNA::NA, _) => Ordering::Greater,
        (_, OptionNA::NA) => Ordering::Less,
    }
}

fn f64_cmp(x: &f64, y: &f64) -> Ordering {
    match (x.is_nan(), y.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => x.partial_cmp(y).unwrap_or(Ordering::Equal),
    }
}

impl Column {
    fn from_vector(x: &Vector) -> Column {
        match x {
            Vector::Logical(v) => Column::Logical(v.values_ref().to_vec()),
            Vector::Integer(v) => Column::Integer(v.values_ref().to_vec()),
            Vector::Double(v) => Column::Double(v.values_ref().to_vec()),
            Vector::Complex(v) => Column::Complex(v.values_ref().to_vec()),
            Vector::Character(v) => Column::Character(v.values_ref().to_vec()),
            Vector::Raw(v) => Column::Raw(v.values_ref().to_vec()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Logical(v) => v.len(),
            Column::Integer(v) => v.len(),
            Column::Double(v) => v.len(),
            Column::Complex(v) => v.len(),
            Column::Character(v) => v.len(),
            Column::Raw(v) => v.len(),
            Column::List(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_missing(&self, i: usize) -> bool {
        match self {
            Column::Logical(v) => v[i].is_na(),
            Column::Integer(v) => v[i].is_na(),
            Column::Double(v) => v[i].is_na(),
            Column::Complex(v) => v[i].is_na(),
            Column::Character(v) => v[i].is_na(),
            Column::Raw(_) => false,
            Column::List(v) => v[i].is_none(),
        }
    }

    /// Element equality where missing values equal each other
    pub fn equal_at(&self, i: usize, other: &Column, j: usize) -> bool {
        match (self, other) {
            (Column::Logical(x), Column::Logical(y)) => x[i] == y[j],
            (Column::Integer(x), Column::Integer(y)) => x[i] == y[j],
            (Column::Double(x), Column::Double(y)) => {
                opt_equal(&x[i], &y[j], |a, b| f64_equal(*a, *b))
            }
            (Column::Complex(x), Column::Complex(y)) => opt_equal(&x[i], &y[j], |a, b| {
                f64_equal(a.re, b.re) && f64_equal(a.im, b.im)
            }),
            (Column::Character(x), Column::Character(y)) => x[i] == y[j],
            (Column::Raw(x), Column::Raw(y)) => x[i] == y[j],
            (Column::List(x), Column::List(y)) => match (&x[i], &y[j]) {
                (Some(p), Some(q)) => p.equals(q),
                (None, None) => true,
                _ => false,
            },
            _ => false,
        }
    }

    pub fn hash_at(&self, i: usize) -> u64 {
        match self {
            Column::Logical(v) => opt_hash(&v[i], |x| hash_bool(*x)),
            Column::Integer(v) => opt_hash(&v[i], |x| hash_i32(*x)),
            Column::Double(v) => opt_hash(&v[i], |x| hash_f64(*x)),
            Column::Complex(v) => opt_hash(&v[i], hash_cplx),
            Column::Character(v) => opt_hash(&v[i], |x| hash_str(x)),
            Column::Raw(v) => hash_u8(v[i]),
            Column::List(v) => match &v[i] {
                Some(p) => p.hash_value(),
                None => NA_HASH,
            },
        }
    }

    /// Element ordering, with missing values last
    ///
    /// Lists have no order and yield `None`.
    ///
    pub fn cmp_at(&self, i: usize, j: usize) -> Option<Ordering> {
        Some(match self {
            Column::Logical(v) => opt_cmp(&v[i], &v[j], |a, b| a.cmp(b)),
            Column::Integer(v) => opt_cmp(&v[i], &v[j], |a, b| a.cmp(b)),
            Column::Double(v) => opt_cmp(&v[i], &v[j], f64_cmp),
            Column::Complex(v) => opt_cmp(&v[i], &v[j], |a, b| {
                f64_cmp(&a.re, &b.re).then_with(|| f64_cmp(&a.im, &b.im))
            }),
            Column::Character(v) => opt_cmp(&v[i], &v[j], |a, b| a.cmp(b)),
            Column::Raw(v) => v[i].cmp(&v[j]),
            Column::List(_) => return None,
        })
    }
}

impl Proxy {
    pub fn new(size: usize, columns: Vec<Column>) -> Self {
        Proxy { size, columns }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Whether every column is missing at row `i`
    ///
    /// A proxy without columns has no missing rows.
    ///
    pub fn is_missing(&self, i: usize) -> bool {
        !self.columns.is_empty() && self.columns.iter().all(|c| c.is_missing(i))
    }

    /// Row equality where missing values equal each other
    pub fn equal_rows(&self, i: usize, other: &Proxy, j: usize) -> bool {
        self.columns.len() == other.columns.len()
            && self
                .columns
                .iter()
                .zip(&other.columns)
                .all(|(x, y)| x.equal_at(i, y, j))
    }

    /// Row equality where comparisons with missing values are unknown
    ///
    /// Any column that differs makes the rows unequal. Otherwise, any column
    /// with a missing value on either side makes the result unknown.
    ///
    pub fn equal_rows_propagate(&self, i: usize, other: &Proxy, j: usize) -> Logical {
        if self.columns.len() != other.columns.len() {
            return Logical::Some(false);
        }

        let mut unknown = false;
        for (x, y) in self.columns.iter().zip(&other.columns) {
            if x.is_missing(i) || y.is_missing(j) {
                unknown = true;
            } else if !x.equal_at(i, y, j) {
                return Logical::Some(false);
            }
        }

        if unknown {
            Logical::NA
        } else {
            Logical::Some(true)
        }
    }

    pub fn hash_row(&self, i: usize) -> u64 {
        self.columns
            .iter()
            .fold(0, |h, c| hash_combine(h, c.hash_at(i)))
    }

    pub fn hash_rows(&self) -> Vec<u64> {
        (0..self.size).map(|i| self.hash_row(i)).collect()
    }

    /// Whole-value equality, used to compare list elements
    pub fn equals(&self, other: &Proxy) -> bool {
        self.size == other.size && (0..self.size).all(|i| self.equal_rows(i, other, i))
    }

    /// Whole-value hash, consistent with [`Proxy::equals`]
    pub fn hash_value(&self) -> u64 {
        (0..self.size).fold(hash_size(self.size), |h, i| hash_combine(h, self.hash_row(i)))
    }

    /// Whether rows can be ordered
    pub fn is_orderable(&self) -> bool {
        !self.columns.iter().any(|c| matches!(c, Column::List(_)))
    }

    /// Lexicographic row ordering across columns
    ///
    /// Returns `None` when any column is unorderable.
    ///
    pub fn cmp_rows(&self, i: usize, j: usize) -> Option<Ordering> {
        let mut ord = Ordering::Equal;
        for c in &self.columns {
            ord = ord.then(c.cmp_at(i, j)?);
        }
        Some(ord)
    }
}

impl Registry {
    /// Build the comparison proxy of a value
    ///
    /// Extended values stored as records compare as records. Other extended
    /// values are only comparable through a registered proxy hook.
    /// The hook's result is proxied with dispatch off, so it must reduce to
    /// atomic storage, a list or a record.
    ///
    pub fn equality_proxy(&self, x: &Value) -> Result<Proxy> {
        self.equality_proxy_impl(x, true)
    }

    fn equality_proxy_impl(&self, x: &Value, dispatch: bool) -> Result<Proxy> {
        let kind = classify(x, dispatch);
        match (kind, x) {
            (KindTag::Null, _) => Ok(Proxy::new(0, vec![])),
            (k, Value::Vector(v)) if k.is_atomic() => {
                Ok(Proxy::new(v.len(), vec![Column::from_vector(v)]))
            }
            (k, Value::Extended(ext)) if k.is_atomic() => match ext.data() {
                Value::Vector(v) => Ok(Proxy::new(v.len(), vec![Column::from_vector(v)])),
                _ => Err(crate::internal_err!("atomic extended value without vector storage")),
            },
            (KindTag::List, Value::List(l)) => {
                let elements = l
                    .iter()
                    .map(|e| match e {
                        Value::Null => Ok(None),
                        e => self.equality_proxy_impl(e, true).map(Some),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Proxy::new(l.len(), vec![Column::List(elements)]))
            }
            (KindTag::Record, Value::Extended(ext)) => {
                self.equality_proxy_impl(ext.data(), true)
            }
            (KindTag::Record, Value::Record(r)) => {
                let mut columns = vec![];
                for (_, field) in r.fields() {
                    columns.extend(self.equality_proxy_impl(field, true)?.columns);
                }
                Ok(Proxy::new(r.size(), columns))
            }
            (KindTag::Extended, Value::Extended(ext)) => {
                let Some(hook) = self.find_proxy(ext.class()) else {
                    return Err(Error::Unsupported(ext.class().to_string(), "equality_proxy"));
                };

                let proxied = hook(x)?;
                let (n, m) = (x.size()?, proxied.size()?);
                if n != m {
                    return Err(Error::IncompatibleSize(m, n));
                }

                tracing::trace!(class = %ext.class(), "proxied extended value");
                self.equality_proxy_impl(&proxied, false)
            }
            (_, x) => Err(Error::Unsupported(
                ptype_name(x),
                "equality_proxy",
            )),
        }
    }
}

fn ptype_name(x: &Value) -> String {
    match x {
        Value::Scalar(s) => s.class().to_string(),
        Value::Extended(e) => e.class().to_string(),
        x => classify(x, false).to_string(),
    }
}

/// Build a comparison proxy using the process-wide registry
pub fn equality_proxy(x: &Value) -> Result<Proxy> {
    Registry::global().equality_proxy(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{chr, dbl, int, lgl, record};

    #[test]
    fn atomic_proxies_project_onto_themselves() {
        let p = Registry::new().equality_proxy(&int![1, NA]).unwrap();
        assert_eq!(p.size(), 2);
        assert_eq!(p.columns(), &[Column::Integer(vec![Integer::Some(1), Integer::NA])]);
    }

    #[test]
    fn records_flatten() {
        let inner = record!(b = chr!["x", "y"], c = lgl![true, NA]);
        let x = record!(a = int![1, 2], d = inner);
        let p = Registry::new().equality_proxy(&x).unwrap();
        assert_eq!(p.size(), 2);
        assert_eq!(p.columns().len(), 3);
        assert!(matches!(p.columns()[1], Column::Character(_)));
    }

    #[test]
    fn classed_records_compare_as_records() {
        let data = record!(a = int![1, 1], b = chr!["x", "x"]);
        let x = Value::from(Extended::new("tbl", data.clone()));

        // no hook is needed for tabular storage
        let reg = Registry::new();
        let p = reg.equality_proxy(&x).unwrap();
        assert_eq!(p, reg.equality_proxy(&data).unwrap());
        assert!(p.equal_rows(0, &p, 1));
    }

    #[test]
    fn missing_rows_need_every_field_missing() {
        let x = record!(a = int![NA, NA, 1], b = chr![NA, "x", NA]);
        let p = Registry::new().equality_proxy(&x).unwrap();
        assert!(p.is_missing(0));
        assert!(!p.is_missing(1));
        assert!(!p.is_missing(2));
    }

    #[test]
    fn list_elements_are_proxied() {
        let x = Value::list(vec![int![1, 2], Value::Null, dbl![1.0, 2.0], int![1, 2]]);
        let p = Registry::new().equality_proxy(&x).unwrap();
        assert!(p.is_missing(1));
        assert!(p.equal_rows(0, &p, 3));
        assert!(!p.equal_rows(0, &p, 2));
        assert_eq!(p.hash_row(0), p.hash_row(3));
    }

    #[test]
    fn extended_needs_a_hook() {
        let x = Value::from(Extended::new("pct", dbl![0.5]));

        let reg = Registry::new();
        assert!(matches!(reg.equality_proxy(&x), Err(Error::Unsupported(..))));

        let mut reg = Registry::new();
        reg.register_proxy("pct", |x| match x {
            Value::Extended(e) => Ok(e.data().clone()),
            _ => unreachable!(),
        });
        let p = reg.equality_proxy(&x).unwrap();
        assert_eq!(p.columns(), &[Column::Double(vec![Double::Some(0.5)])]);
    }

    #[test]
    fn hooks_returning_extended_values_do_not_recurse() {
        let mut reg = Registry::new();
        reg.register_proxy("loop", |x| Ok(x.clone()));

        // atomic storage is used as is once dispatch is off
        let x = Value::from(Extended::new("loop", int![1]));
        let p = reg.equality_proxy(&x).unwrap();
        assert_eq!(p.columns(), &[Column::Integer(vec![Integer::Some(1)])]);

        let x = Value::from(Extended::new("loop", Value::list(vec![int![1]])));
        assert!(matches!(reg.equality_proxy(&x), Err(Error::Unsupported(..))));
    }

    #[test]
    fn hooks_must_preserve_size() {
        let mut reg = Registry::new();
        reg.register_proxy("short", |_| Ok(int![1]));
        let x = Value::from(Extended::new("short", int![1, 2]));
        assert!(matches!(reg.equality_proxy(&x), Err(Error::IncompatibleSize(1, 2))));
    }

    #[test]
    fn scalars_are_not_comparable() {
        let x = Value::Scalar(Scalar::new("environment"));
        assert!(matches!(
            Registry::new().equality_proxy(&x),
            Err(Error::Unsupported(..))
        ));
    }

    #[test]
    fn row_ordering() {
        let x = record!(a = int![2, 1, 1, NA], b = chr!["a", "b", "a", "a"]);
        let p = Registry::new().equality_proxy(&x).unwrap();
        assert_eq!(p.cmp_rows(1, 2), Some(Ordering::Greater));
        assert_eq!(p.cmp_rows(0, 1), Some(Ordering::Greater));
        assert_eq!(p.cmp_rows(3, 0), Some(Ordering::Greater));

        let l = Registry::new().equality_proxy(&Value::list(vec![int![1]])).unwrap();
        assert!(!l.is_orderable());
        assert_eq!(l.cmp_rows(0, 0), None);
    }
}
