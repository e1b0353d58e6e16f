use std::fmt::{Debug, Display};
use std::sync::Arc;

/// Vector storage
///
/// Values are held behind a shared, immutable allocation. Cloning a `Rep` is
/// cheap and never copies elements, which is what allows a value cast to its
/// own type to be handed back without reallocating. Every operation that
/// would change the contents produces a new `Rep`.
///
#[derive(Clone, PartialEq)]
pub struct Rep<T>(Arc<Vec<T>>);

impl<T> Rep<T> {
    /// Create an empty vector
    pub fn new() -> Self {
        Rep(Arc::new(Vec::new()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    /// Borrow all values
    pub fn values_ref(&self) -> &[T] {
        self.0.as_slice()
    }

    /// Whether two vectors share the same allocation
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn map<U, F>(&self, f: F) -> Rep<U>
    where
        F: FnMut(&T) -> U,
    {
        Rep(Arc::new(self.0.iter().map(f).collect()))
    }

    /// Materialize a subset of elements
    ///
    /// Indices are expected to be in bounds; they are produced internally from
    /// the size of the same value.
    ///
    pub fn subset(&self, indices: &[usize]) -> Self
    where
        T: Clone,
    {
        Rep(Arc::new(indices.iter().map(|&i| self.0[i].clone()).collect()))
    }
}

impl<T> Default for Rep<T> {
    fn default() -> Self {
        Rep::new()
    }
}

impl<T> From<Vec<T>> for Rep<T> {
    fn from(x: Vec<T>) -> Self {
        Rep(Arc::new(x))
    }
}

impl<T> FromIterator<T> for Rep<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Rep(Arc::new(iter.into_iter().collect()))
    }
}

impl<'a, T> IntoIterator for &'a Rep<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: Debug> Debug for Rep<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<T: Display> Display for Rep<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, x) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_storage() {
        let x = Rep::from(vec![1, 2, 3]);
        let y = x.clone();
        assert!(x.ptr_eq(&y));
        assert!(!x.ptr_eq(&x.map(|i| *i)));
    }

    #[test]
    fn subset_materializes() {
        let x = Rep::from(vec![10, 20, 30]);
        assert_eq!(x.subset(&[2, 0, 0]), Rep::from(vec![30, 10, 10]));
        assert_eq!(x.subset(&[]).len(), 0);
    }

    #[test]
    fn display() {
        assert_eq!(Rep::from(vec![1, 2]).to_string(), "[1, 2]");
    }
}
