//! Row hashing over comparison proxies
//!
//! Hashes are deterministic within and across processes. Elements that are
//! equal when missing values compare equal always hash identically: every
//! missing marker shares one hash, `NaN` payloads are canonicalized and
//! `-0.0` hashes as `0.0`.

use xxhash_rust::xxh3::xxh3_64;

use crate::object::Cplx;

pub const NA_HASH: u64 = 0x6e61_6e61_6e61_6e61;

#[inline]
pub fn hash_combine(x: u64, y: u64) -> u64 {
    x ^ y
        .wrapping_add(0x9e37_79b9_7f4a_7c15)
        .wrapping_add(x << 6)
        .wrapping_add(x >> 2)
}

#[inline]
pub fn hash_bool(x: bool) -> u64 {
    xxh3_64(&[x as u8])
}

#[inline]
pub fn hash_i32(x: i32) -> u64 {
    xxh3_64(&x.to_le_bytes())
}

#[inline]
pub fn hash_f64(x: f64) -> u64 {
    let canonical = if x.is_nan() {
        f64::NAN
    } else if x == 0.0 {
        0.0
    } else {
        x
    };
    xxh3_64(&canonical.to_bits().to_le_bytes())
}

#[inline]
pub fn hash_cplx(x: &Cplx) -> u64 {
    hash_combine(hash_f64(x.re), hash_f64(x.im))
}

#[inline]
pub fn hash_str(x: &str) -> u64 {
    xxh3_64(x.as_bytes())
}

#[inline]
pub fn hash_u8(x: u8) -> u64 {
    xxh3_64(&[x])
}

#[inline]
pub fn hash_size(x: usize) -> u64 {
    xxh3_64(&(x as u64).to_le_bytes())
}

/// Equality matching the hashing rules above
#[inline]
pub fn f64_equal(x: f64, y: f64) -> bool {
    x == y || (x.is_nan() && y.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_doubles() {
        assert_eq!(hash_f64(0.0), hash_f64(-0.0));
        assert_eq!(hash_f64(f64::NAN), hash_f64(-f64::NAN));
        assert_ne!(hash_f64(1.0), hash_f64(2.0));
        assert!(f64_equal(f64::NAN, f64::NAN));
        assert!(f64_equal(0.0, -0.0));
        assert!(!f64_equal(f64::NAN, 1.0));
    }

    #[test]
    fn deterministic() {
        assert_eq!(hash_str("a"), hash_str("a"));
        assert_eq!(hash_combine(hash_i32(1), hash_i32(2)), hash_combine(hash_i32(1), hash_i32(2)));
        assert_ne!(hash_combine(hash_i32(1), hash_i32(2)), hash_combine(hash_i32(2), hash_i32(1)));
    }
}
