use crate::error::{Error, Result};
use crate::object::Value;
use crate::types::*;

/// Position in the numeric promotion chain
fn numeric_rank(x: &Prototype) -> Option<u8> {
    match x {
        Prototype::Logical => Some(0),
        Prototype::Integer => Some(1),
        Prototype::Double => Some(2),
        Prototype::Complex => Some(3),
        _ => None,
    }
}

/// Common type of two primitive prototypes
///
/// Logical, integer, double and complex promote along a chain. Every other
/// primitive only combines with itself.
///
fn primitive_common_type(x: &Prototype, y: &Prototype) -> Result<Prototype> {
    match (numeric_rank(x), numeric_rank(y)) {
        (Some(rx), Some(ry)) => Ok(if rx >= ry { x.clone() } else { y.clone() }),
        _ if x == y => Ok(x.clone()),
        _ => Err(Error::incompatible_type(x, y)),
    }
}

impl Registry {
    /// Common type of two prototypes
    ///
    /// Unspecified is the identity element. `NULL` only combines with itself.
    /// Primitive kinds follow the fixed promotion table; records, extended
    /// types and scalars dispatch on the pair of type identities in either
    /// order, then fall back to accepting two identical types.
    ///
    /// The result is not finalized, so unspecified record fields survive
    /// until [`Registry::common_type_all`] finishes.
    ///
    pub fn common_type(&self, x: &Prototype, y: &Prototype) -> Result<Prototype> {
        use Prototype::*;
        tracing::trace!(%x, %y, "resolving common type");

        match (x, y) {
            (Unspecified, _) => Ok(y.clone()),
            (_, Unspecified) => Ok(x.clone()),
            (Null, Null) => Ok(Null),
            (Null, _) | (_, Null) => Err(Error::incompatible_type(x, y)),
            _ if x.kind().is_primitive() && y.kind().is_primitive() => {
                primitive_common_type(x, y)
            }
            _ => self.dispatch_common_type(x, y),
        }
    }

    fn dispatch_common_type(&self, x: &Prototype, y: &Prototype) -> Result<Prototype> {
        let (kx, ky) = (TypeKey::of(x), TypeKey::of(y));

        match self.find_common_type(&kx, &ky) {
            Some((rule, false)) => {
                tracing::debug!(?kx, ?ky, "dispatching common type rule");
                rule(self, x, y)
            }
            Some((rule, true)) => {
                tracing::debug!(?kx, ?ky, "dispatching swapped common type rule");
                rule(self, y, x)
            }
            None if x == y && !matches!(x, Prototype::Scalar(_)) => Ok(x.clone()),
            None => Err(Error::incompatible_type(x, y)),
        }
    }

    /// Common type across many prototypes
    ///
    /// Folds pairwise from `seed` (or unspecified) in input order. The first
    /// input that cannot be combined stops the fold, and the error records
    /// its position. The result is finalized.
    ///
    pub fn common_type_all(
        &self,
        ptypes: &[Prototype],
        seed: Option<&Prototype>,
    ) -> Result<Prototype> {
        let mut common = seed.cloned().unwrap_or(Prototype::Unspecified);
        for (i, p) in ptypes.iter().enumerate() {
            common = self.common_type(&common, p).map_err(|e| e.at_index(i))?;
        }
        Ok(common.finalize())
    }

    /// Common type of the prototypes of many values
    pub fn ptype_common(&self, values: &[Value], seed: Option<&Prototype>) -> Result<Prototype> {
        let ptypes: Vec<Prototype> = values.iter().map(ptype_of).collect();
        self.common_type_all(&ptypes, seed)
    }
}

/// Built-in rule for two record types
///
/// Fields present on both sides take the common type of the pair. Fields
/// present on one side only are carried over with their own type. Fields
/// keep the left-hand order, followed by right-hand fields not yet seen.
///
pub fn record_common_type(reg: &Registry, x: &Prototype, y: &Prototype) -> Result<Prototype> {
    let (Prototype::Record(rx), Prototype::Record(ry)) = (x, y) else {
        return Err(Error::incompatible_type(x, y));
    };

    let mut fields = Vec::with_capacity(rx.fields.len().max(ry.fields.len()));
    for (name, px) in &rx.fields {
        let p = match ry.get(name) {
            Some(py) => reg.common_type(px, py).map_err(|e| e.in_field(name))?,
            None => px.clone(),
        };
        fields.push((name.clone(), p));
    }

    for (name, py) in &ry.fields {
        if rx.get(name).is_none() {
            fields.push((name.clone(), py.clone()));
        }
    }

    Ok(Prototype::Record(RecordType::new(fields)))
}

/// Common type of two prototypes using the process-wide registry
pub fn common_type(x: &Prototype, y: &Prototype) -> Result<Prototype> {
    Registry::global().common_type(x, y)
}

/// Finalized common type of many prototypes using the process-wide registry
pub fn common_type_all(ptypes: &[Prototype]) -> Result<Prototype> {
    Registry::global().common_type_all(ptypes, None)
}

/// Finalized common type of many values using the process-wide registry
pub fn ptype_common(values: &[Value]) -> Result<Prototype> {
    Registry::global().ptype_common(values, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{ClassId, Extended};
    use crate::{chr, dbl, int, lgl, record};
    use rand::prelude::*;

    fn primitives() -> Vec<Prototype> {
        vec![
            Prototype::Unspecified,
            Prototype::Null,
            Prototype::Logical,
            Prototype::Integer,
            Prototype::Double,
            Prototype::Complex,
            Prototype::Character,
            Prototype::Raw,
            Prototype::List,
        ]
    }

    fn random_record(rng: &mut StdRng, depth: usize) -> Prototype {
        let names = ["a", "b", "c"];
        let choices = [
            Prototype::Unspecified,
            Prototype::Logical,
            Prototype::Integer,
            Prototype::Double,
            Prototype::Character,
        ];

        let mut fields = vec![];
        for name in names {
            if rng.gen_bool(0.6) {
                let p = if depth > 0 && rng.gen_bool(0.2) {
                    random_record(rng, depth - 1)
                } else {
                    choices[rng.gen_range(0..choices.len())].clone()
                };
                fields.push((name, p));
            }
        }
        fields.shuffle(rng);
        Prototype::record(fields)
    }

    fn pct() -> Prototype {
        ptype_of(&Value::from(Extended::new("pct", dbl![0.5])))
    }

    #[test]
    fn promotion_chain() {
        let reg = Registry::new();
        let t = |x, y| reg.common_type(&x, &y).unwrap();
        assert_eq!(t(Prototype::Logical, Prototype::Integer), Prototype::Integer);
        assert_eq!(t(Prototype::Integer, Prototype::Double), Prototype::Double);
        assert_eq!(t(Prototype::Logical, Prototype::Complex), Prototype::Complex);
        assert_eq!(t(Prototype::Character, Prototype::Character), Prototype::Character);
        assert_eq!(t(Prototype::List, Prototype::List), Prototype::List);
        assert_eq!(t(Prototype::Null, Prototype::Null), Prototype::Null);
    }

    #[test]
    fn incompatible_primitives() {
        let reg = Registry::new();
        for (x, y) in [
            (Prototype::Character, Prototype::Integer),
            (Prototype::Raw, Prototype::Logical),
            (Prototype::List, Prototype::Double),
            (Prototype::Null, Prototype::Integer),
            (Prototype::Character, Prototype::List),
        ] {
            match reg.common_type(&x, &y) {
                Err(Error::IncompatibleType(i)) => {
                    assert_eq!(i.x, x);
                    assert_eq!(i.y, y);
                }
                r => panic!("expected incompatible type, found {r:?}"),
            }
        }
    }

    #[test]
    fn commutative_over_builtins() {
        let reg = Registry::new();
        let mut rng = StdRng::seed_from_u64(42);

        let mut ptypes = primitives();
        ptypes.extend((0..40).map(|_| random_record(&mut rng, 2)));
        ptypes.push(pct());

        for x in &ptypes {
            for y in &ptypes {
                match (reg.common_type(x, y), reg.common_type(y, x)) {
                    (Ok(l), Ok(r)) => assert_eq!(l, r, "{x} and {y}"),
                    (Err(_), Err(_)) => (),
                    (l, r) => panic!("{x} and {y} disagree: {l:?} vs {r:?}"),
                }
            }
        }
    }

    #[test]
    fn unspecified_is_the_identity() {
        let reg = Registry::new();
        let mut rng = StdRng::seed_from_u64(7);

        let mut ptypes = primitives();
        ptypes.extend((0..10).map(|_| random_record(&mut rng, 1)));
        ptypes.push(pct());
        ptypes.push(Prototype::Scalar(ClassId::new("function")));

        for p in &ptypes {
            assert_eq!(&reg.common_type(&Prototype::Unspecified, p).unwrap(), p);
            assert_eq!(&reg.common_type(p, &Prototype::Unspecified).unwrap(), p);
        }
    }

    #[test]
    fn records_combine_fieldwise() {
        let x = ptype_of(&record!(a = int![1], b = lgl![NA]));
        let y = ptype_of(&record!(a = dbl![1.0], c = chr!["x"]));

        let common = Registry::new().common_type(&x, &y).unwrap();
        let expect = Prototype::record(vec![
            ("a", Prototype::Double),
            ("b", Prototype::Unspecified),
            ("c", Prototype::Character),
        ]);
        assert_eq!(common, expect);
        match common {
            Prototype::Record(r) => {
                assert_eq!(r.names().collect::<Vec<_>>(), vec!["a", "b", "c"])
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn records_finalize_once() {
        let x = ptype_of(&record!(a = lgl![NA]));
        let y = ptype_of(&record!(a = int![1]));

        let reg = Registry::new();
        let common = reg.common_type_all(&[x.clone(), y], None).unwrap();
        assert_eq!(common, Prototype::record(vec![("a", Prototype::Integer)]));

        let common = reg.common_type_all(&[x.clone(), x], None).unwrap();
        assert_eq!(common, Prototype::record(vec![("a", Prototype::Logical)]));
    }

    #[test]
    fn record_field_conflict() {
        let x = ptype_of(&record!(a = int![1]));
        let y = ptype_of(&record!(a = chr!["a"]));
        match Registry::new().common_type(&x, &y) {
            Err(Error::IncompatibleType(i)) => {
                assert_eq!(i.field.as_deref(), Some("a"));
                assert_eq!(i.x, Prototype::Integer);
                assert_eq!(i.y, Prototype::Character);
            }
            r => panic!("expected incompatible type, found {r:?}"),
        }
    }

    #[test]
    fn records_do_not_combine_with_primitives() {
        let x = ptype_of(&record!(a = int![1]));
        assert!(Registry::new().common_type(&x, &Prototype::Integer).is_err());
    }

    #[test]
    fn reports_first_incompatible_input() {
        let reg = Registry::new();
        let ptypes = [
            Prototype::Logical,
            Prototype::Integer,
            Prototype::Character,
            Prototype::Raw,
        ];

        match reg.common_type_all(&ptypes, None) {
            Err(Error::IncompatibleType(i)) => {
                assert_eq!(i.index, Some(2));
                assert_eq!(i.x, Prototype::Integer);
                assert_eq!(i.y, Prototype::Character);
            }
            r => panic!("expected incompatible type, found {r:?}"),
        }
    }

    #[test]
    fn seeded_resolution() {
        let reg = Registry::new();
        let common = reg
            .common_type_all(&[Prototype::Logical], Some(&Prototype::Double))
            .unwrap();
        assert_eq!(common, Prototype::Double);

        assert_eq!(reg.common_type_all(&[], None).unwrap(), Prototype::Logical);
        assert_eq!(
            reg.ptype_common(&[lgl![NA], int![1]], None).unwrap(),
            Prototype::Integer
        );
    }

    #[test]
    fn extended_dispatch() {
        let mut reg = Registry::new();
        reg.register_common_type("pct", KindTag::Double, |_, _, _| Ok(pct()));

        assert_eq!(reg.common_type(&pct(), &Prototype::Double).unwrap(), pct());
        assert_eq!(reg.common_type(&Prototype::Double, &pct()).unwrap(), pct());
        assert_eq!(reg.common_type(&pct(), &pct()).unwrap(), pct());
        assert!(reg.common_type(&pct(), &Prototype::Character).is_err());
    }

    #[test]
    fn extended_attributes_are_part_of_the_type() {
        let reg = Registry::new();
        let x = ptype_of(&Value::from(Extended::new("fct", int![1]).with_attr("levels", "a")));
        let y = ptype_of(&Value::from(Extended::new("fct", int![1]).with_attr("levels", "b")));
        assert!(reg.common_type(&x, &y).is_err());
    }

    #[test]
    fn scalars_never_combine() {
        let f = Prototype::Scalar(ClassId::new("function"));
        assert!(Registry::new().common_type(&f, &f).is_err());
    }
}
