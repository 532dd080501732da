//! Deterministic hash-based identity for types and generation targets.
//!
//! [`TypeHash`] is a 64-bit hash computed from names and signatures. Two
//! callables with the same owner, name and parameter types always hash the
//! same, which is what the builder-name conflict pass compares: colliding
//! builder names are only a conflict when they come from *different* targets.
//!
//! # Examples
//!
//! ```
//! use defaultgen_core::TypeHash;
//!
//! let int_hash = TypeHash::from_name("int");
//! assert_eq!(int_hash, TypeHash::from_name("int"));
//!
//! let owner = TypeHash::from_name("com.acme.Server");
//! let ctor1 = TypeHash::from_constructor(owner, &[int_hash]);
//! let ctor2 = TypeHash::from_constructor(owner, &[TypeHash::from_name("string")]);
//! assert_ne!(ctor1, ctor2);
//! ```

use std::fmt;
use xxhash_rust::xxh64::xxh64;

/// Domain-specific mixing constants for hash computation.
pub mod hash_constants {
    /// Separator constant for path components
    pub const SEP: u64 = 0x4bc94d6bd06053ad;

    /// Domain marker for type hashes
    pub const TYPE: u64 = 0x2fac10b63a6cc57c;

    /// Domain marker for method hashes
    pub const METHOD: u64 = 0x7d3c8b4a92e15f6d;

    /// Domain marker for constructor hashes
    pub const CONSTRUCTOR: u64 = 0x9a7f3d5e2b8c4601;

    /// Parameter position mixing constants.
    /// Each parameter position gets a unique constant so parameter order matters.
    pub const PARAM_MARKERS: [u64; 16] = [
        0x9e3779b97f4a7c15,
        0xbf58476d1ce4e5b9,
        0x94d049bb133111eb,
        0xd6e8feb86659fd93,
        0xe7037ed1a0b428db,
        0xc6a4a7935bd1e995,
        0x8648dbbc94d49b8d,
        0xa2b48b2c69e0d657,
        0x7c3e9f2a5b8d1403,
        0x5d8c7b4a3e9f2106,
        0x3f1e9d8c7b5a4203,
        0x1a2b3c4d5e6f7089,
        0x9f8e7d6c5b4a3210,
        0x2468ace013579bdf,
        0xfdb97531eca86420,
        0x123456789abcdef0,
    ];
}

/// A deterministic 64-bit hash identifying a type or a generation target.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Create a type hash from a qualified type name.
    #[inline]
    pub fn from_name(name: &str) -> Self {
        TypeHash(hash_constants::TYPE ^ xxh64(name.as_bytes(), 0))
    }

    /// Create a method hash from owner type, method name and parameter types.
    #[inline]
    pub fn from_method(owner: TypeHash, name: &str, param_hashes: &[TypeHash]) -> Self {
        let seed = hash_constants::METHOD ^ owner.0 ^ xxh64(name.as_bytes(), 0);
        TypeHash(mix_params(seed, param_hashes))
    }

    /// Create a constructor hash from owner type and parameter types.
    ///
    /// Constructors have no name of their own; owner + params identify them.
    #[inline]
    pub fn from_constructor(owner: TypeHash, param_hashes: &[TypeHash]) -> Self {
        TypeHash(mix_params(
            hash_constants::CONSTRUCTOR ^ owner.0,
            param_hashes,
        ))
    }
}

fn mix_params(mut hash: u64, param_hashes: &[TypeHash]) -> u64 {
    for (i, param) in param_hashes.iter().enumerate() {
        let marker = hash_constants::PARAM_MARKERS
            .get(i)
            .copied()
            .unwrap_or_else(|| hash_constants::PARAM_MARKERS[0].wrapping_add(i as u64));
        // wrapping_mul keeps the mix order-sensitive, unlike a plain XOR
        hash = hash
            .wrapping_mul(hash_constants::SEP)
            .wrapping_add(marker ^ param.0);
    }
    hash
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_is_deterministic() {
        assert_eq!(TypeHash::from_name("Server"), TypeHash::from_name("Server"));
        assert_ne!(TypeHash::from_name("Server"), TypeHash::from_name("Client"));
    }

    #[test]
    fn parameter_order_matters() {
        let owner = TypeHash::from_name("Server");
        let a = TypeHash::from_name("int");
        let b = TypeHash::from_name("string");
        assert_ne!(
            TypeHash::from_constructor(owner, &[a, b]),
            TypeHash::from_constructor(owner, &[b, a])
        );
    }

    #[test]
    fn methods_and_constructors_are_distinct_domains() {
        let owner = TypeHash::from_name("Server");
        let int = TypeHash::from_name("int");
        assert_ne!(
            TypeHash::from_method(owner, "", &[int]),
            TypeHash::from_constructor(owner, &[int])
        );
    }

    #[test]
    fn many_parameters_do_not_panic() {
        let owner = TypeHash::from_name("Wide");
        let params: Vec<_> = (0..40).map(|i| TypeHash::from_name(&i.to_string())).collect();
        let hash = TypeHash::from_method(owner, "configure", &params);
        assert_eq!(hash, TypeHash::from_method(owner, "configure", &params));
        assert_ne!(hash, TypeHash::from_method(owner, "configure", &params[..39]));
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(TypeHash(0x2a).to_string(), "0x000000000000002a");
    }
}
