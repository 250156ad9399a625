//! Storage strategies for the children of a [`Line`](crate::Line).
//!
//! A line is built over exactly one strategy, chosen by its type parameter:
//!
//! - [`Ordered`]: a list. Duplicate names are allowed, insertion order is kept
//!   and children can be addressed by position.
//! - [`Unique`]: a map keyed by name, backed by [`IndexMap`] so iteration (and
//!   therefore serialization) follows first-insertion order. Adding a child
//!   whose name already exists replaces it in place.
//!
//! Both implement [`Storage`]. Positional operations exist on the trait so that
//! code written against a list keeps compiling, but on [`Unique`] they return
//! [`Error::UnsupportedOperation`] instead of guessing at a meaning.
//!
//! ## Examples
//!
//! ```rust
//! use lineput::{Ordered, Storage, Sub, Unique};
//!
//! let mut list = Ordered::new();
//! list.add(Sub::with_info("name", "Thomas"));
//! list.add(Sub::with_info("name", "Alex"));
//! assert_eq!(list.len(), 2);
//!
//! let mut map = Unique::new();
//! map.add(Sub::with_info("name", "Thomas"));
//! map.add(Sub::with_info("name", "Alex"));
//! assert_eq!(map.len(), 1);
//! assert!(map.get(0).is_err());
//! ```

use crate::record::Record;
use crate::{Error, Result, Sub};
use indexmap::IndexMap;
use std::fmt;
use std::ops::{Deref, DerefMut};
use tracing::{debug, trace};

/// Identifies a storage strategy in errors and diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageKind {
    Ordered,
    Unique,
}

impl StorageKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            StorageKind::Ordered => "ordered",
            StorageKind::Unique => "unique",
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The container contract shared by both strategies.
///
/// "Identity" below means equality as defined by [`Sub`]'s `PartialEq`
/// (content hash), not pointer identity.
pub trait Storage: Default + Clone + fmt::Debug {
    const KIND: StorageKind;

    type Iter<'a>: DoubleEndedIterator<Item = &'a Sub> + ExactSizeIterator
    where
        Self: 'a;

    /// Mutable handle to one child. Renaming the child through it keeps the
    /// container consistent.
    type SubMut<'a>: DerefMut<Target = Sub>
    where
        Self: 'a;

    /// Adds a child. [`Unique`] returns the child it replaced, if any.
    fn add(&mut self, sub: Sub) -> Option<Sub>;

    /// Removes the first child with this name.
    fn remove(&mut self, name: &str) -> Option<Sub>;

    /// Removes the first child equal to `sub`.
    fn remove_sub(&mut self, sub: &Sub) -> bool;

    /// Removes every child with this name and returns how many were removed.
    fn remove_all(&mut self, name: &str) -> usize;

    /// First child with this name.
    fn find(&self, name: &str) -> Option<&Sub>;

    /// Mutable access to the first child with this name.
    fn find_mut(&mut self, name: &str) -> Option<Self::SubMut<'_>>;

    /// First child with this name, appending an empty one when missing.
    fn find_or_add(&mut self, name: &str) -> Self::SubMut<'_>;

    fn len(&self) -> usize;

    fn clear(&mut self);

    /// Iterates children in container order.
    fn iter(&self) -> Self::Iter<'_>;

    fn get(&self, index: usize) -> Result<&Sub>;

    fn get_mut(&mut self, index: usize) -> Result<Self::SubMut<'_>>;

    /// Replaces the child at `index`, returning the old one.
    fn set(&mut self, index: usize, sub: Sub) -> Result<Sub>;

    fn insert(&mut self, index: usize, sub: Sub) -> Result<()>;

    fn remove_at(&mut self, index: usize) -> Result<Sub>;

    fn index_of(&self, name: &str) -> Result<Option<usize>>;

    fn index_of_sub(&self, sub: &Sub) -> Result<Option<usize>>;

    fn indexes_of(&self, name: &str) -> Result<Vec<usize>>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    fn contains_sub(&self, sub: &Sub) -> bool {
        self.iter().any(|s| s == sub)
    }

    /// First child whose display info equals `display`.
    fn find_info(&self, display: &str) -> Option<&Sub> {
        self.iter().find(|s| s.info() == display)
    }

    fn find_all(&self, name: &str) -> Vec<&Sub> {
        self.iter().filter(|s| s.name() == name).collect()
    }

    fn find_all_info(&self, display: &str) -> Vec<&Sub> {
        self.iter().filter(|s| s.info() == display).collect()
    }

    /// First child whose name contains `pattern`.
    fn search(&self, pattern: &str) -> Option<&Sub> {
        self.iter().find(|s| s.name().contains(pattern))
    }

    /// Every child whose name contains `pattern`.
    fn search_all(&self, pattern: &str) -> Vec<&Sub> {
        self.iter().filter(|s| s.name().contains(pattern)).collect()
    }

    fn first(&self) -> Option<&Sub> {
        self.iter().next()
    }

    fn last(&self) -> Option<&Sub> {
        self.iter().next_back()
    }
}

/// List storage: duplicates allowed, insertion order kept.
#[derive(Clone, Debug, Default)]
pub struct Ordered(Vec<Sub>);

impl Ordered {
    #[must_use]
    pub fn new() -> Self {
        Ordered(Vec::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Ordered(Vec::with_capacity(capacity))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Sub] {
        &self.0
    }

    fn check(&self, index: usize) -> Result<()> {
        if index < self.0.len() {
            Ok(())
        } else {
            Err(Error::index_out_of_bounds(index, self.0.len()))
        }
    }
}

impl Storage for Ordered {
    const KIND: StorageKind = StorageKind::Ordered;

    type Iter<'a> = std::slice::Iter<'a, Sub>;
    type SubMut<'a> = &'a mut Sub;

    fn add(&mut self, sub: Sub) -> Option<Sub> {
        self.0.push(sub);
        None
    }

    fn remove(&mut self, name: &str) -> Option<Sub> {
        let index = self.0.iter().position(|s| s.name() == name)?;
        Some(self.0.remove(index))
    }

    fn remove_sub(&mut self, sub: &Sub) -> bool {
        match self.0.iter().position(|s| s == sub) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }

    fn remove_all(&mut self, name: &str) -> usize {
        let before = self.0.len();
        self.0.retain(|s| s.name() != name);
        before - self.0.len()
    }

    fn find(&self, name: &str) -> Option<&Sub> {
        self.0.iter().find(|s| s.name() == name)
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut Sub> {
        self.0.iter_mut().find(|s| s.name() == name)
    }

    fn find_or_add(&mut self, name: &str) -> &mut Sub {
        let index = match self.0.iter().position(|s| s.name() == name) {
            Some(index) => index,
            None => {
                self.0.push(Sub::new(name));
                self.0.len() - 1
            }
        };
        &mut self.0[index]
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn clear(&mut self) {
        self.0.clear();
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.0.iter()
    }

    fn get(&self, index: usize) -> Result<&Sub> {
        self.check(index)?;
        Ok(&self.0[index])
    }

    fn get_mut(&mut self, index: usize) -> Result<&mut Sub> {
        self.check(index)?;
        Ok(&mut self.0[index])
    }

    fn set(&mut self, index: usize, sub: Sub) -> Result<Sub> {
        self.check(index)?;
        Ok(std::mem::replace(&mut self.0[index], sub))
    }

    fn insert(&mut self, index: usize, sub: Sub) -> Result<()> {
        if index > self.0.len() {
            return Err(Error::index_out_of_bounds(index, self.0.len()));
        }
        self.0.insert(index, sub);
        Ok(())
    }

    fn remove_at(&mut self, index: usize) -> Result<Sub> {
        self.check(index)?;
        Ok(self.0.remove(index))
    }

    fn index_of(&self, name: &str) -> Result<Option<usize>> {
        Ok(self.0.iter().position(|s| s.name() == name))
    }

    fn index_of_sub(&self, sub: &Sub) -> Result<Option<usize>> {
        Ok(self.0.iter().position(|s| s == sub))
    }

    fn indexes_of(&self, name: &str) -> Result<Vec<usize>> {
        Ok(self
            .0
            .iter()
            .enumerate()
            .filter(|(_, s)| s.name() == name)
            .map(|(i, _)| i)
            .collect())
    }
}

impl IntoIterator for Ordered {
    type Item = Sub;
    type IntoIter = std::vec::IntoIter<Sub>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<Sub> for Ordered {
    fn from_iter<T: IntoIterator<Item = Sub>>(iter: T) -> Self {
        Ordered(iter.into_iter().collect())
    }
}

/// Map storage keyed by child name: later writes replace earlier ones.
#[derive(Clone, Debug, Default)]
pub struct Unique(IndexMap<String, Sub>);

impl Unique {
    #[must_use]
    pub fn new() -> Self {
        Unique(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Unique(IndexMap::with_capacity(capacity))
    }

    /// Names of the children, in iteration order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Sub> {
        self.0.keys()
    }

    fn unsupported<T>(operation: &'static str) -> Result<T> {
        debug!(target: "lineput::storage", operation, "positional call rejected on unique storage");
        Err(Error::unsupported(operation, StorageKind::Unique))
    }
}

impl Storage for Unique {
    const KIND: StorageKind = StorageKind::Unique;

    type Iter<'a> = indexmap::map::Values<'a, String, Sub>;
    type SubMut<'a> = UniqueSubMut<'a>;

    fn add(&mut self, sub: Sub) -> Option<Sub> {
        self.0.insert(sub.name().to_string(), sub)
    }

    fn remove(&mut self, name: &str) -> Option<Sub> {
        self.0.shift_remove(name)
    }

    fn remove_sub(&mut self, sub: &Sub) -> bool {
        if self.0.get(sub.name()) == Some(sub) {
            self.0.shift_remove(sub.name());
            true
        } else {
            false
        }
    }

    fn remove_all(&mut self, name: &str) -> usize {
        usize::from(self.0.shift_remove(name).is_some())
    }

    fn find(&self, name: &str) -> Option<&Sub> {
        self.0.get(name)
    }

    fn find_mut(&mut self, name: &str) -> Option<UniqueSubMut<'_>> {
        let index = self.0.get_index_of(name)?;
        Some(UniqueSubMut {
            map: &mut self.0,
            index,
        })
    }

    fn find_or_add(&mut self, name: &str) -> UniqueSubMut<'_> {
        let index = match self.0.get_index_of(name) {
            Some(index) => index,
            None => self.0.insert_full(name.to_string(), Sub::new(name)).0,
        };
        UniqueSubMut {
            map: &mut self.0,
            index,
        }
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn clear(&mut self) {
        self.0.clear();
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.0.values()
    }

    fn get(&self, _index: usize) -> Result<&Sub> {
        Self::unsupported("get")
    }

    fn get_mut(&mut self, _index: usize) -> Result<UniqueSubMut<'_>> {
        Self::unsupported("get_mut")
    }

    fn set(&mut self, _index: usize, _sub: Sub) -> Result<Sub> {
        Self::unsupported("set")
    }

    fn insert(&mut self, _index: usize, _sub: Sub) -> Result<()> {
        Self::unsupported("insert")
    }

    fn remove_at(&mut self, _index: usize) -> Result<Sub> {
        Self::unsupported("remove_at")
    }

    fn index_of(&self, _name: &str) -> Result<Option<usize>> {
        Self::unsupported("index_of")
    }

    fn index_of_sub(&self, _sub: &Sub) -> Result<Option<usize>> {
        Self::unsupported("index_of_sub")
    }

    fn indexes_of(&self, _name: &str) -> Result<Vec<usize>> {
        Self::unsupported("indexes_of")
    }

    fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    fn contains_sub(&self, sub: &Sub) -> bool {
        self.0.get(sub.name()) == Some(sub)
    }
}

/// Mutable handle into a [`Unique`] container.
///
/// When the handle is dropped after the child was renamed, the child is
/// re-keyed under its new name at the same position, and any other child
/// already holding that name is removed.
pub struct UniqueSubMut<'a> {
    map: &'a mut IndexMap<String, Sub>,
    index: usize,
}

impl Deref for UniqueSubMut<'_> {
    type Target = Sub;

    fn deref(&self) -> &Sub {
        &self.map[self.index]
    }
}

impl DerefMut for UniqueSubMut<'_> {
    fn deref_mut(&mut self) -> &mut Sub {
        &mut self.map[self.index]
    }
}

impl fmt::Debug for UniqueSubMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl Drop for UniqueSubMut<'_> {
    fn drop(&mut self) {
        let renamed = match self.map.get_index(self.index) {
            Some((key, sub)) if key != sub.name() => sub.name().to_string(),
            _ => return,
        };
        let mut index = self.index;
        if let Some((clash, _, _)) = self.map.shift_remove_full(&renamed) {
            trace!(target: "lineput::storage", name = %renamed, "rename replaced existing child");
            if clash < index {
                index -= 1;
            }
        }
        if let Some((_, sub)) = self.map.shift_remove_index(index) {
            self.map.shift_insert(index, renamed, sub);
        }
    }
}

impl IntoIterator for Unique {
    type Item = Sub;
    type IntoIter = indexmap::map::IntoValues<String, Sub>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_values()
    }
}

impl FromIterator<Sub> for Unique {
    fn from_iter<T: IntoIterator<Item = Sub>>(iter: T) -> Self {
        let mut unique = Unique::new();
        for sub in iter {
            unique.add(sub);
        }
        unique
    }
}
