use crate::object::*;
use crate::types::KindTag;

/// Element conversion that reports lost information
///
/// Returns the converted element and whether the conversion changed it, by
/// rounding, dropping an imaginary part or substituting a missing value.
/// Missing elements always convert to missing elements without loss.
///
pub trait CoercibleInto<T> {
    fn coerce_into(&self) -> (T, bool);
}

#[inline]
fn lossless<T>(x: T) -> (T, bool) {
    (x, false)
}

fn format_double(x: f64) -> String {
    if x.is_nan() {
        "NaN".to_string()
    } else if x.is_infinite() {
        let s = if x > 0.0 { "Inf" } else { "-Inf" };
        s.to_string()
    } else {
        x.to_string()
    }
}

fn double_to_integer(x: f64) -> (Integer, bool) {
    if !x.is_finite() || x >= (i32::MAX as f64) + 1.0 || x <= (i32::MIN as f64) - 1.0 {
        return (OptionNA::NA, true);
    }
    let truncated = x.trunc();
    (OptionNA::Some(truncated as i32), truncated != x)
}

fn parse_double(s: &str) -> Option<f64> {
    match s.trim() {
        "Inf" => Some(f64::INFINITY),
        "-Inf" => Some(f64::NEG_INFINITY),
        s => s.parse().ok(),
    }
}

// logical

impl CoercibleInto<Integer> for Logical {
    fn coerce_into(&self) -> (Integer, bool) {
        lossless(self.as_ref().map(|&b| b as i32))
    }
}

impl CoercibleInto<Double> for Logical {
    fn coerce_into(&self) -> (Double, bool) {
        lossless(self.as_ref().map(|&b| b as i32 as f64))
    }
}

impl CoercibleInto<Complex> for Logical {
    fn coerce_into(&self) -> (Complex, bool) {
        lossless(self.as_ref().map(|&b| Cplx::new(b as i32 as f64, 0.0)))
    }
}

impl CoercibleInto<Character> for Logical {
    fn coerce_into(&self) -> (Character, bool) {
        lossless(self.as_ref().map(|&b| String::from(if b { "TRUE" } else { "FALSE" })))
    }
}

impl CoercibleInto<Raw> for Logical {
    fn coerce_into(&self) -> (Raw, bool) {
        match self {
            OptionNA::Some(b) => (*b as u8, false),
            OptionNA::NA => (0, true),
        }
    }
}

// integer

impl CoercibleInto<Logical> for Integer {
    fn coerce_into(&self) -> (Logical, bool) {
        match self {
            OptionNA::Some(i) => (OptionNA::Some(*i != 0), !matches!(i, 0 | 1)),
            OptionNA::NA => (OptionNA::NA, false),
        }
    }
}

impl CoercibleInto<Double> for Integer {
    fn coerce_into(&self) -> (Double, bool) {
        lossless(self.as_ref().map(|&i| i as f64))
    }
}

impl CoercibleInto<Complex> for Integer {
    fn coerce_into(&self) -> (Complex, bool) {
        lossless(self.as_ref().map(|&i| Cplx::new(i as f64, 0.0)))
    }
}

impl CoercibleInto<Character> for Integer {
    fn coerce_into(&self) -> (Character, bool) {
        lossless(self.as_ref().map(|i| i.to_string()))
    }
}

impl CoercibleInto<Raw> for Integer {
    fn coerce_into(&self) -> (Raw, bool) {
        match self {
            OptionNA::Some(i) => match u8::try_from(*i) {
                Ok(b) => (b, false),
                Err(_) => (0, true),
            },
            OptionNA::NA => (0, true),
        }
    }
}

// double

impl CoercibleInto<Logical> for Double {
    fn coerce_into(&self) -> (Logical, bool) {
        match self {
            OptionNA::Some(x) if x.is_nan() => (OptionNA::NA, true),
            OptionNA::Some(x) => (OptionNA::Some(*x != 0.0), *x != 0.0 && *x != 1.0),
            OptionNA::NA => (OptionNA::NA, false),
        }
    }
}

impl CoercibleInto<Integer> for Double {
    fn coerce_into(&self) -> (Integer, bool) {
        match self {
            OptionNA::Some(x) => double_to_integer(*x),
            OptionNA::NA => (OptionNA::NA, false),
        }
    }
}

impl CoercibleInto<Complex> for Double {
    fn coerce_into(&self) -> (Complex, bool) {
        lossless(self.as_ref().map(|&x| Cplx::new(x, 0.0)))
    }
}

impl CoercibleInto<Character> for Double {
    fn coerce_into(&self) -> (Character, bool) {
        lossless(self.as_ref().map(|&x| format_double(x)))
    }
}

impl CoercibleInto<Raw> for Double {
    fn coerce_into(&self) -> (Raw, bool) {
        let (i, lossy) = CoercibleInto::<Integer>::coerce_into(self);
        let (b, lossy_raw) = CoercibleInto::<Raw>::coerce_into(&i);
        (b, lossy || lossy_raw)
    }
}

// complex, through its real part

impl Complex {
    fn real(&self) -> (Double, bool) {
        match self {
            OptionNA::Some(c) => (OptionNA::Some(c.re), c.im != 0.0),
            OptionNA::NA => (OptionNA::NA, false),
        }
    }
}

impl CoercibleInto<Double> for Complex {
    fn coerce_into(&self) -> (Double, bool) {
        self.real()
    }
}

impl CoercibleInto<Integer> for Complex {
    fn coerce_into(&self) -> (Integer, bool) {
        let (re, lossy) = self.real();
        let (i, lossy_int) = CoercibleInto::<Integer>::coerce_into(&re);
        (i, lossy || lossy_int)
    }
}

impl CoercibleInto<Logical> for Complex {
    fn coerce_into(&self) -> (Logical, bool) {
        let (re, lossy) = self.real();
        let (b, lossy_lgl) = CoercibleInto::<Logical>::coerce_into(&re);
        (b, lossy || lossy_lgl)
    }
}

impl CoercibleInto<Character> for Complex {
    fn coerce_into(&self) -> (Character, bool) {
        lossless(self.as_ref().map(|c| c.to_string()))
    }
}

// character, by parsing

impl CoercibleInto<Logical> for Character {
    fn coerce_into(&self) -> (Logical, bool) {
        match self {
            OptionNA::Some(s) => match s.as_str() {
                "TRUE" | "true" | "True" | "T" => (OptionNA::Some(true), false),
                "FALSE" | "false" | "False" | "F" => (OptionNA::Some(false), false),
                _ => (OptionNA::NA, true),
            },
            OptionNA::NA => (OptionNA::NA, false),
        }
    }
}

impl CoercibleInto<Integer> for Character {
    fn coerce_into(&self) -> (Integer, bool) {
        match self {
            OptionNA::Some(s) => match s.trim().parse::<i32>() {
                Ok(i) => (OptionNA::Some(i), false),
                Err(_) => match parse_double(s) {
                    Some(x) => double_to_integer(x),
                    None => (OptionNA::NA, true),
                },
            },
            OptionNA::NA => (OptionNA::NA, false),
        }
    }
}

impl CoercibleInto<Double> for Character {
    fn coerce_into(&self) -> (Double, bool) {
        match self {
            OptionNA::Some(s) => match parse_double(s) {
                Some(x) => (OptionNA::Some(x), false),
                None => (OptionNA::NA, true),
            },
            OptionNA::NA => (OptionNA::NA, false),
        }
    }
}

impl CoercibleInto<Complex> for Character {
    fn coerce_into(&self) -> (Complex, bool) {
        let (x, lossy) = CoercibleInto::<Double>::coerce_into(self);
        (x.map(|re| Cplx::new(re, 0.0)), lossy)
    }
}

// raw

impl CoercibleInto<Logical> for Raw {
    fn coerce_into(&self) -> (Logical, bool) {
        (OptionNA::Some(*self != 0), *self > 1)
    }
}

impl CoercibleInto<Integer> for Raw {
    fn coerce_into(&self) -> (Integer, bool) {
        lossless(OptionNA::Some(*self as i32))
    }
}

impl CoercibleInto<Double> for Raw {
    fn coerce_into(&self) -> (Double, bool) {
        lossless(OptionNA::Some(*self as f64))
    }
}

impl CoercibleInto<Character> for Raw {
    fn coerce_into(&self) -> (Character, bool) {
        lossless(OptionNA::Some(format!("{self:02x}")))
    }
}

/// Convert every element, collecting the positions that lost information
pub fn coerce_rep<T, U>(x: &Rep<T>) -> (Rep<U>, Vec<usize>)
where
    T: CoercibleInto<U>,
{
    let mut lossy = Vec::new();
    let values: Vec<U> = x
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let (u, lost) = v.coerce_into();
            if lost {
                lossy.push(i);
            }
            u
        })
        .collect();

    (Rep::from(values), lossy)
}

/// Cast an atomic vector to another atomic kind
///
/// Returns `None` when no conversion exists between the two kinds. Casting to
/// the vector's own kind returns it unchanged.
///
pub fn coerce_vector(x: &Vector, to: KindTag) -> Option<(Vector, Vec<usize>)> {
    use KindTag as K;

    macro_rules! coerce {
        ($rep:expr, $ty:ty) => {{
            let (v, lossy) = coerce_rep::<_, $ty>($rep);
            Some((Vector::from(v), lossy))
        }};
    }

    if KindTag::from(x) == to {
        return Some((x.clone(), vec![]));
    }

    match (x, to) {
        (Vector::Logical(v), K::Integer) => coerce!(v, Integer),
        (Vector::Logical(v), K::Double) => coerce!(v, Double),
        (Vector::Logical(v), K::Complex) => coerce!(v, Complex),
        (Vector::Logical(v), K::Character) => coerce!(v, Character),
        (Vector::Logical(v), K::Raw) => coerce!(v, Raw),

        (Vector::Integer(v), K::Logical) => coerce!(v, Logical),
        (Vector::Integer(v), K::Double) => coerce!(v, Double),
        (Vector::Integer(v), K::Complex) => coerce!(v, Complex),
        (Vector::Integer(v), K::Character) => coerce!(v, Character),
        (Vector::Integer(v), K::Raw) => coerce!(v, Raw),

        (Vector::Double(v), K::Logical) => coerce!(v, Logical),
        (Vector::Double(v), K::Integer) => coerce!(v, Integer),
        (Vector::Double(v), K::Complex) => coerce!(v, Complex),
        (Vector::Double(v), K::Character) => coerce!(v, Character),
        (Vector::Double(v), K::Raw) => coerce!(v, Raw),

        (Vector::Complex(v), K::Logical) => coerce!(v, Logical),
        (Vector::Complex(v), K::Integer) => coerce!(v, Integer),
        (Vector::Complex(v), K::Double) => coerce!(v, Double),
        (Vector::Complex(v), K::Character) => coerce!(v, Character),

        (Vector::Character(v), K::Logical) => coerce!(v, Logical),
        (Vector::Character(v), K::Integer) => coerce!(v, Integer),
        (Vector::Character(v), K::Double) => coerce!(v, Double),
        (Vector::Character(v), K::Complex) => coerce!(v, Complex),

        (Vector::Raw(v), K::Logical) => coerce!(v, Logical),
        (Vector::Raw(v), K::Integer) => coerce!(v, Integer),
        (Vector::Raw(v), K::Double) => coerce!(v, Double),
        (Vector::Raw(v), K::Character) => coerce!(v, Character),

        _ => None,
    }
}
