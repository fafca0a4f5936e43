//! Object key storage with versioning support.
//!
//! Provides [`ObjectStore`], an enum dispatching between [`KeyStore`]
//! (un-versioned) and [`VersionedKeyStore`] (versioned). Uses `BTreeMap`
//! internally so keys are always iterated in byte-lexicographic order, which
//! listings rely on.

use std::collections::{BTreeMap, HashSet};
use std::ops::Bound;

use miniomock_model::types::NULL_VERSION_ID;
use tracing::debug;

use super::object::{ObjectVersion, S3DeleteMarker, S3Object};

// ---------------------------------------------------------------------------
// List result types
// ---------------------------------------------------------------------------

/// An entry of a listing.
#[derive(Debug, Clone)]
pub enum ListEntry {
    /// An object version or delete marker.
    Version {
        /// The listed version.
        version: ObjectVersion,
        /// Whether this is the current version of its key.
        is_latest: bool,
    },
    /// A common prefix grouping keys below a delimiter.
    CommonPrefix(String),
}

/// Result of a listing, in key order.
#[derive(Debug, Clone, Default)]
pub struct ListResult {
    /// Versions and common prefixes, interleaved in key order.
    pub entries: Vec<ListEntry>,
    /// Whether more entries were available than `max_keys`.
    pub is_truncated: bool,
    /// The key (or common prefix) of the last returned entry when truncated.
    pub next_marker: Option<String>,
}

// ---------------------------------------------------------------------------
// ObjectStore (enum dispatch)
// ---------------------------------------------------------------------------

/// Top-level object store that dispatches to either an un-versioned or
/// versioned backing store.
#[derive(Debug)]
pub enum ObjectStore {
    /// Un-versioned storage. Each key maps to exactly one object.
    Unversioned(KeyStore),
    /// Versioned storage. Each key maps to an ordered list of versions.
    Versioned(VersionedKeyStore),
}

impl Default for ObjectStore {
    fn default() -> Self {
        Self::Unversioned(KeyStore::default())
    }
}

impl ObjectStore {
    /// Store an object version.
    ///
    /// Un-versioned stores replace the key's object. Versioned stores make
    /// the object the key's current version; a `"null"` version replaces
    /// any existing `"null"` entry. Returns the replaced entry, if any.
    pub fn put(&mut self, object: S3Object) -> Option<ObjectVersion> {
        match self {
            Self::Unversioned(ks) => ks.put(object).map(|o| ObjectVersion::Object(Box::new(o))),
            Self::Versioned(vs) => vs.put(object),
        }
    }

    /// Make a delete marker the key's current version.
    ///
    /// Un-versioned stores cannot hold markers; the key is removed instead.
    pub fn put_delete_marker(&mut self, marker: S3DeleteMarker) -> Option<ObjectVersion> {
        match self {
            Self::Unversioned(ks) => ks
                .delete(&marker.key)
                .map(|o| ObjectVersion::Object(Box::new(o))),
            Self::Versioned(vs) => vs.put_delete_marker(marker),
        }
    }

    /// Get the current object for a key.
    ///
    /// Returns `None` if the key doesn't exist or its current version is a
    /// delete marker.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&S3Object> {
        match self {
            Self::Unversioned(ks) => ks.get(key),
            Self::Versioned(vs) => vs.get(key),
        }
    }

    /// Get a specific version of an object by key and version ID.
    ///
    /// Returns `None` for delete markers; see [`Self::is_delete_marker`].
    #[must_use]
    pub fn get_version(&self, key: &str, version_id: &str) -> Option<&S3Object> {
        match self {
            Self::Unversioned(ks) => {
                if version_id == NULL_VERSION_ID {
                    ks.get(key)
                } else {
                    None
                }
            }
            Self::Versioned(vs) => vs.get_version(key, version_id),
        }
    }

    /// Mutable access to a specific object version.
    pub fn get_version_mut(&mut self, key: &str, version_id: &str) -> Option<&mut S3Object> {
        match self {
            Self::Unversioned(ks) => {
                if version_id == NULL_VERSION_ID {
                    ks.objects.get_mut(key)
                } else {
                    None
                }
            }
            Self::Versioned(vs) => vs.get_version_mut(key, version_id),
        }
    }

    /// Check if a specific version ID for a key is a delete marker.
    #[must_use]
    pub fn is_delete_marker(&self, key: &str, version_id: &str) -> bool {
        match self {
            Self::Unversioned(_) => false,
            Self::Versioned(vs) => vs.is_delete_marker(key, version_id),
        }
    }

    /// Whether the key's current version is a delete marker.
    #[must_use]
    pub fn is_latest_delete_marker(&self, key: &str) -> bool {
        match self {
            Self::Unversioned(_) => false,
            Self::Versioned(vs) => vs
                .objects
                .get(key)
                .and_then(|versions| versions.first())
                .is_some_and(ObjectVersion::is_delete_marker),
        }
    }

    /// Whether any version or delete marker exists for the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        match self {
            Self::Unversioned(ks) => ks.objects.contains_key(key),
            Self::Versioned(vs) => vs.objects.contains_key(key),
        }
    }

    /// Physically remove a key and all of its versions.
    pub fn delete(&mut self, key: &str) -> Option<S3Object> {
        match self {
            Self::Unversioned(ks) => ks.delete(key),
            Self::Versioned(vs) => vs
                .objects
                .remove(key)
                .and_then(|versions| versions.into_iter().find_map(into_object)),
        }
    }

    /// Delete a specific version of an object.
    pub fn delete_version(&mut self, key: &str, version_id: &str) -> Option<ObjectVersion> {
        match self {
            Self::Unversioned(ks) => {
                if version_id == NULL_VERSION_ID {
                    ks.delete(key).map(|o| ObjectVersion::Object(Box::new(o)))
                } else {
                    None
                }
            }
            Self::Versioned(vs) => vs.delete_version(key, version_id),
        }
    }

    /// List the current object of every live key.
    #[must_use]
    pub fn list_objects(
        &self,
        prefix: &str,
        delimiter: &str,
        start_after: &str,
        max_keys: usize,
    ) -> ListResult {
        match self {
            Self::Unversioned(ks) => ks.list_objects(prefix, delimiter, start_after, max_keys),
            Self::Versioned(vs) => vs.list_objects(prefix, delimiter, start_after, max_keys),
        }
    }

    /// List every version and delete marker.
    #[must_use]
    pub fn list_object_versions(
        &self,
        prefix: &str,
        delimiter: &str,
        start_after: &str,
        max_keys: usize,
    ) -> ListResult {
        match self {
            // Un-versioned objects are their key's only ("null") version.
            Self::Unversioned(ks) => ks.list_objects(prefix, delimiter, start_after, max_keys),
            Self::Versioned(vs) => {
                vs.list_object_versions(prefix, delimiter, start_after, max_keys)
            }
        }
    }

    /// Count of keys whose current version is not a delete marker.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Unversioned(ks) => ks.len(),
            Self::Versioned(vs) => vs.len(),
        }
    }

    /// Whether the store holds no version and no delete marker at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Unversioned(ks) => ks.is_empty(),
            Self::Versioned(vs) => vs.objects.is_empty(),
        }
    }

    /// Transition from un-versioned to versioned storage.
    ///
    /// If already versioned this is a no-op. Existing objects become the
    /// `"null"` version of their key.
    pub fn transition_to_versioned(&mut self) {
        if let Self::Unversioned(ks) = self {
            debug!("transitioning object store from unversioned to versioned");
            let mut vs = VersionedKeyStore::default();
            for (key, mut obj) in std::mem::take(&mut ks.objects) {
                obj.version_id = NULL_VERSION_ID.to_owned();
                vs.objects
                    .insert(key, vec![ObjectVersion::Object(Box::new(obj))]);
            }
            *self = Self::Versioned(vs);
        }
    }

    /// Whether the store is in versioned mode.
    #[must_use]
    pub fn is_versioned(&self) -> bool {
        matches!(self, Self::Versioned(_))
    }
}

// ---------------------------------------------------------------------------
// KeyStore (un-versioned)
// ---------------------------------------------------------------------------

/// Un-versioned key store. Each key maps to exactly one `S3Object`.
#[derive(Debug, Default)]
pub struct KeyStore {
    /// Sorted map of object key to object.
    objects: BTreeMap<String, S3Object>,
}

impl KeyStore {
    /// Insert or replace an object. Returns the previous object if any.
    pub fn put(&mut self, object: S3Object) -> Option<S3Object> {
        self.objects.insert(object.key.clone(), object)
    }

    /// Get an object by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&S3Object> {
        self.objects.get(key)
    }

    /// Remove an object by key. Returns the removed object if any.
    pub fn delete(&mut self, key: &str) -> Option<S3Object> {
        self.objects.remove(key)
    }

    /// Number of stored objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// List objects matching prefix, delimiter, start-after, and max-keys.
    #[must_use]
    pub fn list_objects(
        &self,
        prefix: &str,
        delimiter: &str,
        start_after: &str,
        max_keys: usize,
    ) -> ListResult {
        let keys = self
            .objects
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(key, _)| key.starts_with(prefix));

        list_from_btree(keys, prefix, delimiter, start_after, max_keys, |obj| {
            vec![(ObjectVersion::Object(Box::new(obj.clone())), true)]
        })
    }
}

// ---------------------------------------------------------------------------
// VersionedKeyStore
// ---------------------------------------------------------------------------

/// Versioned key store. Each key maps to an ordered list of versions
/// (newest first). The first entry is the current version of the key.
#[derive(Debug, Default)]
pub struct VersionedKeyStore {
    /// Sorted map of object key to its version list (newest first).
    objects: BTreeMap<String, Vec<ObjectVersion>>,
}

impl VersionedKeyStore {
    /// Prepend an object version. A `"null"` version replaces the key's
    /// existing `"null"` entry, which is returned.
    pub fn put(&mut self, object: S3Object) -> Option<ObjectVersion> {
        debug!(key = %object.key, version = %object.version_id, "storing versioned object");
        let key = object.key.clone();
        let is_null = object.is_null_version();
        self.push_front(&key, ObjectVersion::Object(Box::new(object)), is_null)
    }

    /// Prepend a delete marker. A `"null"` marker replaces the key's
    /// existing `"null"` entry, which is returned.
    pub fn put_delete_marker(&mut self, marker: S3DeleteMarker) -> Option<ObjectVersion> {
        debug!(key = %marker.key, version = %marker.version_id, "inserted delete marker");
        let key = marker.key.clone();
        let is_null = marker.version_id == NULL_VERSION_ID;
        self.push_front(&key, ObjectVersion::DeleteMarker(marker), is_null)
    }

    fn push_front(
        &mut self,
        key: &str,
        version: ObjectVersion,
        replace_null: bool,
    ) -> Option<ObjectVersion> {
        let versions = self.objects.entry(key.to_owned()).or_default();
        let replaced = if replace_null {
            versions
                .iter()
                .position(|v| v.version_id() == NULL_VERSION_ID)
                .map(|idx| versions.remove(idx))
        } else {
            None
        };
        versions.insert(0, version);
        replaced
    }

    /// Get the current object for a key.
    ///
    /// Returns `None` if the key doesn't exist or if the current version is
    /// a delete marker.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&S3Object> {
        self.objects
            .get(key)
            .and_then(|versions| versions.first()?.as_object())
    }

    /// Get a specific version of an object.
    #[must_use]
    pub fn get_version(&self, key: &str, version_id: &str) -> Option<&S3Object> {
        self.objects.get(key).and_then(|versions| {
            versions
                .iter()
                .find(|v| v.version_id() == version_id)
                .and_then(ObjectVersion::as_object)
        })
    }

    /// Mutable access to a specific object version.
    pub fn get_version_mut(&mut self, key: &str, version_id: &str) -> Option<&mut S3Object> {
        self.objects.get_mut(key).and_then(|versions| {
            versions
                .iter_mut()
                .find(|v| v.version_id() == version_id)
                .and_then(ObjectVersion::as_object_mut)
        })
    }

    /// Check if a specific version ID for a key is a delete marker.
    #[must_use]
    pub fn is_delete_marker(&self, key: &str, version_id: &str) -> bool {
        self.objects
            .get(key)
            .and_then(|versions| {
                versions
                    .iter()
                    .find(|v| v.version_id() == version_id)
                    .map(ObjectVersion::is_delete_marker)
            })
            .unwrap_or(false)
    }

    /// Remove a specific version (object or delete marker) entirely.
    ///
    /// The key disappears once its last version is removed.
    pub fn delete_version(&mut self, key: &str, version_id: &str) -> Option<ObjectVersion> {
        let versions = self.objects.get_mut(key)?;
        let idx = versions.iter().position(|v| v.version_id() == version_id)?;
        let removed = versions.remove(idx);
        if versions.is_empty() {
            self.objects.remove(key);
        }
        debug!(key, version_id, "removed version");
        Some(removed)
    }

    /// Count of keys whose current version is not a delete marker.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects
            .values()
            .filter(|versions| versions.first().is_some_and(|v| !v.is_delete_marker()))
            .count()
    }

    /// Whether zero keys are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// List the current version of each key not hidden by a delete marker.
    #[must_use]
    pub fn list_objects(
        &self,
        prefix: &str,
        delimiter: &str,
        start_after: &str,
        max_keys: usize,
    ) -> ListResult {
        let keys = self
            .objects
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(key, _)| key.starts_with(prefix));

        list_from_btree(keys, prefix, delimiter, start_after, max_keys, |versions| {
            versions
                .first()
                .filter(|latest| !latest.is_delete_marker())
                .map(|latest| vec![(latest.clone(), true)])
                .unwrap_or_default()
        })
    }

    /// List all versions: per key, its object versions newest first, then its
    /// delete markers newest first.
    #[must_use]
    pub fn list_object_versions(
        &self,
        prefix: &str,
        delimiter: &str,
        start_after: &str,
        max_keys: usize,
    ) -> ListResult {
        let keys = self
            .objects
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(key, _)| key.starts_with(prefix));

        list_from_btree(keys, prefix, delimiter, start_after, max_keys, |versions| {
            let indexed = versions.iter().enumerate();
            let objects = indexed.clone().filter(|(_, v)| !v.is_delete_marker());
            let markers = indexed.filter(|(_, v)| v.is_delete_marker());
            objects
                .chain(markers)
                .map(|(idx, v)| (v.clone(), idx == 0))
                .collect()
        })
    }
}

// ---------------------------------------------------------------------------
// Shared listing helper
// ---------------------------------------------------------------------------

/// Build a [`ListResult`] from key-ordered entries, applying start-after,
/// delimiter grouping, and max-keys.
///
/// Truncation happens at key boundaries: a page holds all versions of each
/// key it lists, so a single key with more than `max_keys` versions fills a
/// page on its own.
///
/// `expand` yields the versions a key contributes with their `is_latest`
/// flag; keys contributing nothing are skipped and do not form common
/// prefixes.
fn list_from_btree<'a, V: 'a>(
    keys: impl Iterator<Item = (&'a String, &'a V)>,
    prefix: &str,
    delimiter: &str,
    start_after: &str,
    max_keys: usize,
    mut expand: impl FnMut(&'a V) -> Vec<(ObjectVersion, bool)>,
) -> ListResult {
    let use_delim = !delimiter.is_empty();
    let mut entries: Vec<ListEntry> = Vec::new();
    let mut seen_prefixes = HashSet::new();
    let mut count = 0usize;
    let mut is_truncated = false;
    let mut last_marker: Option<String> = None;

    for (key, value) in keys {
        // Skip keys at or before start_after.
        if !start_after.is_empty() && key.as_str() <= start_after {
            continue;
        }

        let versions = expand(value);
        if versions.is_empty() {
            continue;
        }

        // Delimiter-based grouping.
        if use_delim {
            let after_prefix = &key[prefix.len()..];
            if let Some(pos) = after_prefix.find(delimiter) {
                let cp = format!("{}{}{}", prefix, &after_prefix[..pos], delimiter);
                if seen_prefixes.insert(cp.clone()) {
                    if count >= max_keys {
                        is_truncated = true;
                        break;
                    }
                    last_marker = Some(cp.clone());
                    entries.push(ListEntry::CommonPrefix(cp));
                    count += 1;
                }
                continue;
            }
        }

        // A key's versions are never split across pages.
        if count >= max_keys || (count > 0 && count + versions.len() > max_keys) {
            is_truncated = true;
            break;
        }
        last_marker = Some(key.clone());
        count += versions.len();
        entries.extend(
            versions
                .into_iter()
                .map(|(version, is_latest)| ListEntry::Version { version, is_latest }),
        );
    }

    ListResult {
        entries,
        is_truncated,
        next_marker: if is_truncated { last_marker } else { None },
    }
}

fn into_object(version: ObjectVersion) -> Option<S3Object> {
    match version {
        ObjectVersion::Object(obj) => Some(*obj),
        ObjectVersion::DeleteMarker(_) => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
