use crate::coercion::CastContext;
use crate::error::Result;
use crate::object::Value;
use crate::types::Registry;

use super::Dictionary;

/// Dense group index of every element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Groups {
    /// Group of each element, numbered by first occurrence
    pub id: Vec<usize>,
    /// Number of distinct groups
    pub n: usize,
}

impl Registry {
    /// Whether each element has an equal element elsewhere
    ///
    /// Every occurrence of a repeated value is flagged, including the first.
    ///
    pub fn duplicated(&self, x: &Value) -> Result<Vec<bool>> {
        let Groups { id, n } = self.group_id(x)?;
        let mut counts = vec![0usize; n];
        for &g in &id {
            counts[g] += 1;
        }
        Ok(id.into_iter().map(|g| counts[g] > 1).collect())
    }

    /// Whether any two elements are equal, stopping at the first pair found
    pub fn duplicated_any(&self, x: &Value) -> Result<bool> {
        let p = self.equality_proxy(x)?;
        let mut dict = Dictionary::new(&p);
        Ok((0..p.size()).any(|i| !dict.insert(i).1))
    }

    /// Location of the first element equal to each element
    pub fn duplicate_id(&self, x: &Value) -> Result<Vec<usize>> {
        let p = self.equality_proxy(x)?;
        let (dict, groups) = Dictionary::build(&p);
        let keys = dict.keys();
        Ok(groups.into_iter().map(|g| keys[g]).collect())
    }

    pub fn group_id(&self, x: &Value) -> Result<Groups> {
        let p = self.equality_proxy(x)?;
        let (dict, id) = Dictionary::build(&p);
        Ok(Groups { id, n: dict.len() })
    }

    /// Locations of the first occurrence of each distinct element
    pub fn unique_locations(&self, x: &Value) -> Result<Vec<usize>> {
        let p = self.equality_proxy(x)?;
        let (dict, _) = Dictionary::build(&p);
        Ok(dict.into_keys())
    }

    /// Distinct elements, in order of first occurrence
    pub fn unique(&self, x: &Value) -> Result<Value> {
        x.subset(&self.unique_locations(x)?)
    }

    pub fn unique_count(&self, x: &Value) -> Result<usize> {
        let p = self.equality_proxy(x)?;
        Ok(Dictionary::build(&p).0.len())
    }

    /// Location of the first haystack element equal to each needle
    ///
    /// Needles and haystack are cast to their common type first. Missing
    /// needles match missing haystack elements.
    ///
    pub fn match_values(&self, needles: &Value, haystack: &Value) -> Result<Vec<Option<usize>>> {
        let values = self.cast_common(
            &[needles.clone(), haystack.clone()],
            None,
            &CastContext::new(),
        )?;
        let (pn, ph) = (
            self.equality_proxy(&values[0])?,
            self.equality_proxy(&values[1])?,
        );

        let (dict, _) = Dictionary::build(&ph);
        let keys = dict.keys();
        Ok((0..pn.size())
            .map(|j| dict.find(&pn, j).map(|g| keys[g]))
            .collect())
    }

    /// Whether each needle occurs in the haystack
    pub fn in_values(&self, needles: &Value, haystack: &Value) -> Result<Vec<bool>> {
        Ok(self
            .match_values(needles, haystack)?
            .into_iter()
            .map(|i| i.is_some())
            .collect())
    }
}

pub fn duplicated(x: &Value) -> Result<Vec<bool>> {
    Registry::global().duplicated(x)
}

pub fn duplicated_any(x: &Value) -> Result<bool> {
    Registry::global().duplicated_any(x)
}

pub fn duplicate_id(x: &Value) -> Result<Vec<usize>> {
    Registry::global().duplicate_id(x)
}

pub fn group_id(x: &Value) -> Result<Groups> {
    Registry::global().group_id(x)
}

pub fn unique_locations(x: &Value) -> Result<Vec<usize>> {
    Registry::global().unique_locations(x)
}

pub fn unique(x: &Value) -> Result<Value> {
    Registry::global().unique(x)
}

pub fn unique_count(x: &Value) -> Result<usize> {
    Registry::global().unique_count(x)
}

pub fn match_values(needles: &Value, haystack: &Value) -> Result<Vec<Option<usize>>> {
    Registry::global().match_values(needles, haystack)
}

pub fn in_values(needles: &Value, haystack: &Value) -> Result<Vec<bool>> {
    Registry::global().in_values(needles, haystack)
}

#[cfg(test)]
pub(crate) mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::equality::equal;
    use crate::error::Error;
    use crate::object::{Integer, Logical, Record};
    use crate::{chr, dbl, int, record};

    /// Small integer vectors with repeats and missing values
    pub fn random_int(rng: &mut StdRng, n: usize) -> Value {
        let values: Vec<Integer> = (0..n)
            .map(|_| {
                if rng.gen_bool(0.15) {
                    Integer::NA
                } else {
                    Integer::Some(rng.gen_range(0..4))
                }
            })
            .collect();
        Value::from(values)
    }

    /// Two-field records whose rows are sometimes entirely missing
    pub fn random_record(rng: &mut StdRng, n: usize) -> Value {
        let a = random_int(rng, n);
        let b: Vec<_> = (0..n)
            .map(|_| match rng.gen_range(0..3) {
                0 => crate::object::Character::NA,
                1 => "x".into(),
                _ => "y".into(),
            })
            .collect();
        Value::Record(
            Record::new(vec![("a".to_string(), a), ("b".to_string(), Value::from(b))]).unwrap(),
        )
    }

    fn inputs() -> Vec<Value> {
        let mut rng = StdRng::seed_from_u64(42);
        let mut inputs = vec![];
        for n in [0, 1, 5, 20, 50] {
            inputs.push(random_int(&mut rng, n));
            inputs.push(random_record(&mut rng, n));
        }
        inputs
    }

    fn is_true(x: &[Logical]) -> bool {
        x == [Logical::Some(true)]
    }

    #[test]
    fn duplicated_flags_every_occurrence() {
        let x = chr!["a", "b", "a", NA, "c", NA];
        assert_eq!(
            duplicated(&x).unwrap(),
            vec![true, false, true, true, false, true]
        );
        assert!(duplicated_any(&x).unwrap());
        assert!(!duplicated_any(&chr!["a", "b", NA]).unwrap());
        assert!(!duplicated_any(&Value::Null).unwrap());
    }

    #[test]
    fn duplicate_id_points_at_first_occurrence() {
        let x = int![3, 1, 3, NA, 1, NA];
        assert_eq!(duplicate_id(&x).unwrap(), vec![0, 1, 0, 3, 1, 3]);
        assert_eq!(
            group_id(&x).unwrap(),
            Groups {
                id: vec![0, 1, 0, 2, 1, 2],
                n: 3
            }
        );
    }

    #[test]
    fn unique_keeps_first_occurrence_order() {
        let x = dbl![2.0, NA, 1.0, 2.0, NA];
        assert_eq!(unique(&x).unwrap(), dbl![2.0, NA, 1.0]);

        let x = dbl![2.0, NA, 1.0, 2.0, f64::NAN, NA, f64::NAN, -0.0, 0.0];
        assert_eq!(unique_locations(&x).unwrap(), vec![0, 1, 2, 4, 7]);
        assert_eq!(unique_count(&x).unwrap(), 5);
    }

    #[test]
    fn unique_of_records_and_lists() {
        let x = record!(a = int![1, 1, NA, NA], b = chr!["x", "x", NA, NA]);
        assert_eq!(unique_locations(&x).unwrap(), vec![0, 2]);

        let x = Value::list(vec![int![1], Value::Null, int![1], chr!["1"], Value::Null]);
        assert_eq!(unique_locations(&x).unwrap(), vec![0, 1, 3]);
    }

    #[test]
    fn match_casts_to_common_type() {
        let needles = int![2, NA, 5];
        let haystack = dbl![1.0, 2.0, NA, 2.0];
        assert_eq!(
            match_values(&needles, &haystack).unwrap(),
            vec![Some(1), Some(2), None]
        );
        assert_eq!(
            in_values(&needles, &haystack).unwrap(),
            vec![true, true, false]
        );

        let x = match_values(&int![1], &chr!["1"]);
        assert!(matches!(x, Err(Error::IncompatibleType(..))));
    }

    #[test]
    fn match_records_by_field_name() {
        let needles = record!(a = int![1, 2], b = int![2, 1]);
        let haystack = record!(b = int![1, 2], a = int![2, 1]);
        assert_eq!(
            match_values(&needles, &haystack).unwrap(),
            vec![Some(1), Some(0)]
        );

        let haystack = record!(b = int![1], a = int![2]);
        assert_eq!(match_values(&needles, &haystack).unwrap(), vec![None, Some(0)]);
    }

    #[test]
    fn unique_is_idempotent() {
        for x in inputs() {
            let u = unique(&x).unwrap();
            assert_eq!(unique(&u).unwrap(), u);
            assert_eq!(unique_count(&x).unwrap(), u.size().unwrap());
        }
    }

    #[test]
    fn duplicate_and_unique_agree() {
        for x in inputs() {
            let ids = duplicate_id(&x).unwrap();
            let locs = unique_locations(&x).unwrap();
            for (i, &j) in ids.iter().enumerate() {
                assert!(j <= i);
                let (xi, xj) = (x.subset(&[i]).unwrap(), x.subset(&[j]).unwrap());
                assert!(is_true(&equal(&xi, &xj, true).unwrap()));
                assert_eq!(locs.contains(&i), i == j);
            }
        }
    }

    #[test]
    fn match_and_in_agree() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let needles = random_record(&mut rng, 10);
            let haystack = random_record(&mut rng, 6);
            let m = match_values(&needles, &haystack).unwrap();
            let found = in_values(&needles, &haystack).unwrap();

            for (k, (m, found)) in m.into_iter().zip(found).enumerate() {
                assert_eq!(m.is_some(), found);
                if let Some(i) = m {
                    let n = needles.subset(&[k]).unwrap();
                    let h = haystack.subset(&[i]).unwrap();
                    assert!(is_true(&equal(&n, &h, true).unwrap()));
                }
            }
        }
    }
}
