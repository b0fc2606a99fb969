//! Bucketed key/value store owning every package record of a run.
//!
//! The store is sized once, when packages are loaded, and never rehashes:
//! each identifier hashes to one of a fixed number of buckets and lookups
//! scan that bucket linearly. Package counts are small and known up front,
//! so buckets stay short.

use std::collections::hash_map::RandomState;
use std::hash::BuildHasher;
use std::num::NonZeroUsize;

use thiserror::Error;

use crate::{Package, PackageId};

/// Errors returned by [`PackageStore`] lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record is stored under the identifier.
    #[error("package {id} not found")]
    NotFound {
        /// Requested identifier.
        id: PackageId,
    },
}

type Bucket = Vec<(PackageId, Package)>;

/// Fixed-capacity hash table of package records keyed by [`PackageId`].
///
/// # Examples
/// ```
/// use courier_core::{Package, PackageId, PackageStore};
///
/// let mut store = PackageStore::default();
/// let id = PackageId::new(1);
/// store.insert(id, Package::new(id, "195 W Oakland Ave"));
///
/// assert_eq!(store.get(id)?.address(), "195 W Oakland Ave");
/// assert!(store.remove(id).is_ok());
/// assert!(store.get(id).is_err());
/// # Ok::<(), courier_core::StoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PackageStore {
    buckets: Vec<Bucket>,
    hasher: RandomState,
    len: usize,
}

impl PackageStore {
    /// Bucket count used by [`Default`].
    pub const DEFAULT_BUCKETS: usize = 40;

    /// Create an empty store with `buckets` buckets.
    #[must_use]
    pub fn with_buckets(buckets: NonZeroUsize) -> Self {
        Self {
            buckets: vec![Vec::new(); buckets.get()],
            hasher: RandomState::new(),
            len: 0,
        }
    }

    /// Number of stored records.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the store holds no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets fixed at construction.
    #[must_use]
    pub const fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Insert `package` under `id`, replacing and returning any previous record.
    pub fn insert(&mut self, id: PackageId, package: Package) -> Option<Package> {
        let bucket = self.bucket_mut(id);
        if let Some(entry) = bucket.iter_mut().find(|(key, _)| *key == id) {
            return Some(std::mem::replace(&mut entry.1, package));
        }
        bucket.push((id, package));
        self.len = self.len.saturating_add(1);
        None
    }

    /// Borrow the record stored under `id`.
    pub fn get(&self, id: PackageId) -> Result<&Package, StoreError> {
        self.bucket(id)
            .iter()
            .find(|(key, _)| *key == id)
            .map(|(_, package)| package)
            .ok_or(StoreError::NotFound { id })
    }

    /// Mutably borrow the record stored under `id`.
    pub fn get_mut(&mut self, id: PackageId) -> Result<&mut Package, StoreError> {
        self.bucket_mut(id)
            .iter_mut()
            .find(|(key, _)| *key == id)
            .map(|(_, package)| package)
            .ok_or(StoreError::NotFound { id })
    }

    /// Whether a record is stored under `id`.
    #[must_use]
    pub fn contains(&self, id: PackageId) -> bool {
        self.get(id).is_ok()
    }

    /// Remove and return the record stored under `id`.
    pub fn remove(&mut self, id: PackageId) -> Result<Package, StoreError> {
        let bucket = self.bucket_mut(id);
        let position = bucket
            .iter()
            .position(|(key, _)| *key == id)
            .ok_or(StoreError::NotFound { id })?;
        let (_, package) = bucket.swap_remove(position);
        self.len = self.len.saturating_sub(1);
        Ok(package)
    }

    /// Iterate over every `(id, record)` pair.
    ///
    /// Order is unspecified. Each call starts a fresh pass.
    pub fn iter(&self) -> impl Iterator<Item = (PackageId, &Package)> + '_ {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.iter().map(|(id, package)| (*id, package)))
    }

    /// Stored identifiers in ascending order.
    #[must_use]
    pub fn sorted_ids(&self) -> Vec<PackageId> {
        let mut ids: Vec<PackageId> = self.iter().map(|(id, _)| id).collect();
        ids.sort_unstable();
        ids
    }

    fn bucket_index(&self, id: PackageId) -> usize {
        let hash = self.hasher.hash_one(id);
        let count = u64::try_from(self.buckets.len()).unwrap_or(u64::MAX);
        hash.checked_rem(count)
            .and_then(|index| usize::try_from(index).ok())
            .unwrap_or(0)
    }

    #[expect(
        clippy::indexing_slicing,
        reason = "bucket_index is reduced modulo the non-zero bucket count"
    )]
    fn bucket(&self, id: PackageId) -> &Bucket {
        &self.buckets[self.bucket_index(id)]
    }

    #[expect(
        clippy::indexing_slicing,
        reason = "bucket_index is reduced modulo the non-zero bucket count"
    )]
    fn bucket_mut(&mut self, id: PackageId) -> &mut Bucket {
        let index = self.bucket_index(id);
        &mut self.buckets[index]
    }
}

impl Default for PackageStore {
    fn default() -> Self {
        Self::with_buckets(NonZeroUsize::new(Self::DEFAULT_BUCKETS).unwrap_or(NonZeroUsize::MIN))
    }
}

impl FromIterator<Package> for PackageStore {
    fn from_iter<I: IntoIterator<Item = Package>>(iter: I) -> Self {
        let mut store = Self::default();
        store.extend(iter);
        store
    }
}

impl Extend<Package> for PackageStore {
    fn extend<I: IntoIterator<Item = Package>>(&mut self, iter: I) {
        for package in iter {
            self.insert(package.id(), package);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn package(id: u32, address: &str) -> Package {
        Package::new(PackageId::new(id), address)
    }

    #[fixture]
    fn store() -> PackageStore {
        (1..=12)
            .map(|id| package(id, &format!("{id} Main St")))
            .collect()
    }

    #[rstest]
    fn upsert_replaces_existing_record(mut store: PackageStore) {
        let id = PackageId::new(3);
        let previous = store.insert(id, package(3, "9 Elm St"));
        assert_eq!(previous.map(|p| p.address().to_owned()), Some("3 Main St".into()));
        assert_eq!(store.len(), 12);
        assert_eq!(store.get(id).expect("stored").address(), "9 Elm St");
    }

    #[rstest]
    fn missing_records_report_not_found(mut store: PackageStore) {
        let id = PackageId::new(99);
        assert_eq!(store.get(id).err(), Some(StoreError::NotFound { id }));
        assert_eq!(store.remove(id).err(), Some(StoreError::NotFound { id }));
    }

    #[rstest]
    fn remove_drops_the_entry(mut store: PackageStore) {
        let id = PackageId::new(7);
        store.remove(id).expect("present");
        assert!(!store.contains(id));
        assert_eq!(store.len(), 11);
    }

    #[rstest]
    fn iteration_is_restartable(store: PackageStore) {
        assert_eq!(store.iter().count(), 12);
        assert_eq!(store.iter().count(), 12);
        assert_eq!(store.sorted_ids().first(), Some(&PackageId::new(1)));
    }

    #[rstest]
    fn single_bucket_still_resolves_every_id() {
        let mut store = PackageStore::with_buckets(NonZeroUsize::MIN);
        store.extend((1..=5).map(|id| package(id, "x")));
        assert_eq!(store.bucket_count(), 1);
        for id in 1..=5 {
            assert!(store.contains(PackageId::new(id)));
        }
    }

    #[rstest]
    fn records_are_mutable_in_place(mut store: PackageStore) {
        let id = PackageId::new(1);
        store.get_mut(id).expect("present").notes = "Fragile".into();
        assert_eq!(store.get(id).expect("present").notes, "Fragile");
    }
}
