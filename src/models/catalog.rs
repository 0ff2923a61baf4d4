//! Id-keyed, insertion-ordered entity collections.
//!
//! The input document stores every entity kind as a JSON object keyed by
//! id. A [`Catalog`] enumerates those entries in object property order,
//! which is "collection order" for rooms scanned during event packing,
//! items fed to the ordering policy and output keys:
//!
//! | Key kind | Order |
//! |----------|-------|
//! | Array index (`"0"`, `"17"`, below 2^32 - 1, no leading zero) | ascending numeric, first |
//! | Any other string | insertion order, after all array indices |

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

/// An entity that carries its own identifier.
pub trait Identified {
    /// Entity id.
    fn id(&self) -> &str;
}

/// Array index value of a key, if it is one.
fn array_index(key: &str) -> Option<u32> {
    let canonical = !key.is_empty()
        && key.bytes().all(|b| b.is_ascii_digit())
        && (key == "0" || !key.starts_with('0'));
    if !canonical {
        return None;
    }
    key.parse::<u32>().ok().filter(|&n| n != u32::MAX)
}

/// Ordered map from id to entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog<T> {
    keys: Vec<String>,
    values: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Catalog<T> {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Inserts under `key`. An existing key keeps its position and gets the new value.
    ///
    /// An array-index key lands among the other array-index keys by value,
    /// shifting later entries back by one.
    pub fn insert(&mut self, key: impl Into<String>, value: T) -> usize {
        let key = key.into();
        if let Some(&pos) = self.index.get(&key) {
            self.values[pos] = value;
            return pos;
        }
        let pos = match array_index(&key) {
            Some(n) => self
                .keys
                .iter()
                .position(|k| array_index(k).map_or(true, |m| m > n))
                .unwrap_or(self.keys.len()),
            None => self.keys.len(),
        };
        self.keys.insert(pos, key);
        self.values.insert(pos, value);
        for (i, k) in self.keys.iter().enumerate().skip(pos) {
            self.index.insert(k.clone(), i);
        }
        pos
    }

    /// Looks up an entity by key.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|&pos| &self.values[pos])
    }

    /// Looks up an entity by key, mutably.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        match self.index.get(key) {
            Some(&pos) => Some(&mut self.values[pos]),
            None => None,
        }
    }

    /// Position of a key in collection order.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Whether the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Entity at a position.
    ///
    /// # Panics
    /// If `pos` is out of bounds.
    #[inline]
    pub fn at(&self, pos: usize) -> &T {
        &self.values[pos]
    }

    /// Entity at a position, mutably.
    ///
    /// # Panics
    /// If `pos` is out of bounds.
    #[inline]
    pub fn at_mut(&mut self, pos: usize) -> &mut T {
        &mut self.values[pos]
    }

    /// Key at a position.
    pub fn key_at(&self, pos: usize) -> &str {
        &self.keys[pos]
    }

    /// `(key, entity)` pairs in collection order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.keys.iter().map(String::as_str).zip(self.values.iter())
    }

    /// Entities in collection order.
    pub fn values(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    /// Entities in collection order, mutably.
    pub fn values_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.values.iter_mut()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<T: Identified> Catalog<T> {
    /// Inserts an entity under its own id.
    pub fn push(&mut self, value: T) -> usize {
        let key = value.id().to_string();
        self.insert(key, value)
    }

    /// Builder: inserts an entity under its own id.
    pub fn with(mut self, value: T) -> Self {
        self.push(value);
        self
    }
}

impl<T> Default for Catalog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Identified> FromIterator<T> for Catalog<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for value in iter {
            catalog.push(value);
        }
        catalog
    }
}

impl<T: Serialize> Serialize for Catalog<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Catalog<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CatalogVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for CatalogVisitor<T> {
            type Value = Catalog<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of id to entity")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut catalog = Catalog::new();
                while let Some((key, value)) = map.next_entry::<String, T>()? {
                    catalog.insert(key, value);
                }
                Ok(catalog)
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(Catalog::new())
            }
        }

        deserializer.deserialize_any(CatalogVisitor(PhantomData))
    }
}
