//! Record - Key-based numeric field lookup
//!
//! A record is anything that can answer "what is the value stored under
//! this name". Table rows, hash maps and B-tree maps all qualify, so code
//! that only needs a handful of named fields does not depend on the
//! concrete container that produced them.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// Keyed access to numeric fields
pub trait Record {
    /// Value stored under `key`, if present
    fn field(&self, key: &str) -> Option<f64>;
}

impl<K, S> Record for HashMap<K, f64, S>
where
    K: Borrow<str> + Hash + Eq,
    S: BuildHasher,
{
    fn field(&self, key: &str) -> Option<f64> {
        self.get(key).copied()
    }
}

impl<K> Record for BTreeMap<K, f64>
where
    K: Borrow<str> + Ord,
{
    fn field(&self, key: &str) -> Option<f64> {
        self.get(key).copied()
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, key: &str) -> Option<f64> {
        (**self).field(key)
    }
}
