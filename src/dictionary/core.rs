use hashbrown::HashMap;

use crate::equality::Proxy;

/// Hash-based grouping of the rows of a proxy
///
/// Rows are inserted in order. Each distinct row (with missing values
/// comparing equal) becomes a group, numbered densely by first occurrence.
/// Rows sharing a hash are told apart by full row equality.
///
#[derive(Debug)]
pub struct Dictionary<'a> {
    proxy: &'a Proxy,
    buckets: HashMap<u64, Vec<usize>>,
    keys: Vec<usize>,
}

impl<'a> Dictionary<'a> {
    pub fn new(proxy: &'a Proxy) -> Self {
        Dictionary {
            proxy,
            buckets: HashMap::new(),
            keys: Vec::new(),
        }
    }

    /// Group every row of the proxy, returning each row's group
    pub fn build(proxy: &'a Proxy) -> (Self, Vec<usize>) {
        let mut dict = Dictionary::new(proxy);
        let groups = (0..proxy.size()).map(|i| dict.insert(i).0).collect();
        (dict, groups)
    }

    /// Insert row `i`, returning its group and whether the group is new
    pub fn insert(&mut self, i: usize) -> (usize, bool) {
        let hash = self.proxy.hash_row(i);
        let bucket = self.buckets.entry(hash).or_default();

        for &group in bucket.iter() {
            if self.proxy.equal_rows(self.keys[group], self.proxy, i) {
                return (group, false);
            }
        }

        let group = self.keys.len();
        bucket.push(group);
        self.keys.push(i);
        (group, true)
    }

    /// Find the group of row `j` of another proxy of the same type
    pub fn find(&self, other: &Proxy, j: usize) -> Option<usize> {
        let bucket = self.buckets.get(&other.hash_row(j))?;
        bucket
            .iter()
            .copied()
            .find(|&group| self.proxy.equal_rows(self.keys[group], other, j))
    }

    /// Location of the first row of every group
    pub fn keys(&self) -> &[usize] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn into_keys(self) -> Vec<usize> {
        self.keys
    }
}
