//! Package definition store.
//!
//! `PackageStore` keeps an ordered in-memory view of the catalog on top of a
//! [`PackageBackend`], the persistence layer. The store enforces the
//! cross-record rules the planner relies on:
//! - active quantity ranges never overlap (checked before every write)
//! - at most one definition is the default, switched through a single
//!   backend call that clears the previous default
//! - after a failed write the view is reloaded from the backend, so later
//!   overlap checks see what was actually persisted
//!
//! Concurrent editors are not serialized here; the backend decides and the
//! last write wins.

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::model::{PackageDefinition, PackageDraft, ValidationError};
use crate::ranges::{RangeValidation, validate_quantity_ranges};
use crate::types::QuantityRange;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{message}")]
    RangeConflict {
        message: String,
        conflicting_name: String,
    },

    #[error("Package not found: {0}")]
    NotFound(String),

    #[error("Invalid package order: {0}")]
    InvalidOrder(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Could not load seed catalog: {0}")]
    Seed(String),
}

/// Persistence layer for package definitions.
pub trait PackageBackend {
    /// All definitions, in any order.
    fn list(&self) -> Result<Vec<PackageDefinition>, StoreError>;

    fn insert(&mut self, package: PackageDefinition) -> Result<(), StoreError>;

    fn update(&mut self, package: PackageDefinition) -> Result<(), StoreError>;

    fn delete(&mut self, id: &str) -> Result<(), StoreError>;

    fn set_sort_order(&mut self, id: &str, sort_order: i64) -> Result<(), StoreError>;

    /// Makes `id` the only default definition in one write.
    fn set_default(&mut self, id: &str) -> Result<(), StoreError>;

    /// Generates an identifier for a new definition.
    fn next_id(&mut self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Backend keeping all definitions in process memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    packages: Vec<PackageDefinition>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: &str) -> Result<usize, StoreError> {
        self.packages
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

impl PackageBackend for MemoryBackend {
    fn list(&self) -> Result<Vec<PackageDefinition>, StoreError> {
        Ok(self.packages.clone())
    }

    fn insert(&mut self, package: PackageDefinition) -> Result<(), StoreError> {
        if self.packages.iter().any(|p| p.id == package.id) {
            return Err(StoreError::Backend(format!(
                "Duplicate package id: {}",
                package.id
            )));
        }
        self.packages.push(package);
        Ok(())
    }

    fn update(&mut self, package: PackageDefinition) -> Result<(), StoreError> {
        let idx = self.position(&package.id)?;
        self.packages[idx] = package;
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let idx = self.position(id)?;
        self.packages.remove(idx);
        Ok(())
    }

    fn set_sort_order(&mut self, id: &str, sort_order: i64) -> Result<(), StoreError> {
        let idx = self.position(id)?;
        self.packages[idx].sort_order = sort_order;
        Ok(())
    }

    fn set_default(&mut self, id: &str) -> Result<(), StoreError> {
        let target = self.position(id)?;
        for (idx, package) in self.packages.iter_mut().enumerate() {
            package.is_default = idx == target;
        }
        Ok(())
    }
}

/// New `sort_order` for one definition after a reorder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct SortAssignment {
    pub id: String,
    pub sort_order: i64,
}

/// Rewrites each id's `sort_order` to its position in `ordered_ids`.
pub fn reorder_assignments<S: AsRef<str>>(ordered_ids: &[S]) -> Vec<SortAssignment> {
    ordered_ids
        .iter()
        .enumerate()
        .map(|(idx, id)| SortAssignment {
            id: id.as_ref().to_string(),
            sort_order: idx as i64,
        })
        .collect()
}

/// Reads a JSON array of package drafts used to seed an empty catalog.
pub fn load_seed_catalog(path: &Path) -> Result<Vec<PackageDraft>, StoreError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| StoreError::Seed(format!("{}: {}", path.display(), err)))?;
    serde_json::from_str(&raw)
        .map_err(|err| StoreError::Seed(format!("{}: {}", path.display(), err)))
}

/// Ordered view of the catalog over a backend.
#[derive(Debug)]
pub struct PackageStore<B: PackageBackend> {
    backend: B,
    packages: Vec<PackageDefinition>,
}

impl<B: PackageBackend> PackageStore<B> {
    /// Creates a store and loads the current catalog from `backend`.
    pub fn load(backend: B) -> Result<Self, StoreError> {
        let mut store = Self {
            backend,
            packages: Vec::new(),
        };
        store.refresh()?;
        Ok(store)
    }

    /// Reloads the catalog from the backend.
    pub fn refresh(&mut self) -> Result<(), StoreError> {
        let mut packages = self.backend.list()?;
        packages.sort_by_key(|p| p.sort_order);
        self.packages = packages;
        Ok(())
    }

    /// All definitions ordered by `sort_order`.
    pub fn list(&self) -> &[PackageDefinition] {
        &self.packages
    }

    /// Active definitions ordered by `sort_order`.
    pub fn active(&self) -> Vec<PackageDefinition> {
        self.packages.iter().filter(|p| p.is_active).cloned().collect()
    }

    pub fn get(&self, id: &str) -> Option<&PackageDefinition> {
        self.packages.iter().find(|p| p.id == id)
    }

    #[cfg(test)]
    pub(crate) fn backend(&self) -> &B {
        &self.backend
    }

    /// Checks a candidate range against the current active catalog.
    pub fn validate_range(
        &self,
        candidate: QuantityRange,
        exclude_id: Option<&str>,
    ) -> RangeValidation {
        validate_quantity_ranges(candidate, &self.packages, exclude_id)
    }

    /// Adds a definition at the end of the current order.
    pub fn create(&mut self, draft: PackageDraft) -> Result<PackageDefinition, StoreError> {
        draft.validate()?;
        if draft.is_active {
            self.ensure_no_overlap(draft.quantity_range(), None)?;
        }

        let make_default = draft.is_default;
        let sort_order = self
            .packages
            .iter()
            .map(|p| p.sort_order + 1)
            .max()
            .unwrap_or(0);
        let id = self.backend.next_id();
        let mut package = PackageDefinition::from_draft(id.clone(), draft, sort_order)?;
        package.is_default = false;
        let dimensions = package.dimensions();

        let written = self.backend.insert(package).and_then(|()| {
            if make_default {
                self.backend.set_default(&id)
            } else {
                Ok(())
            }
        });
        if let Err(err) = written {
            return Err(self.reload_after_failure("create", err));
        }
        self.refresh()?;
        tracing::info!(package_id = %id, %dimensions, "Package definition created");

        self.get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id))
    }

    /// Replaces the editable fields of an existing definition.
    pub fn update(
        &mut self,
        id: &str,
        draft: PackageDraft,
    ) -> Result<PackageDefinition, StoreError> {
        let mut package = self
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        draft.validate()?;
        if draft.is_active {
            self.ensure_no_overlap(draft.quantity_range(), Some(id))?;
        }

        let make_default = draft.is_default && !package.is_default;
        package.apply_draft(draft)?;
        if make_default {
            package.is_default = false;
        }

        let written = self.backend.update(package).and_then(|()| {
            if make_default {
                self.backend.set_default(id)
            } else {
                Ok(())
            }
        });
        if let Err(err) = written {
            return Err(self.reload_after_failure("update", err));
        }
        self.refresh()?;
        tracing::info!(package_id = %id, "Package definition updated");

        self.get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        if self.get(id).is_none() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        if let Err(err) = self.backend.delete(id) {
            return Err(self.reload_after_failure("delete", err));
        }
        self.refresh()?;
        tracing::info!(package_id = %id, "Package definition deleted");
        Ok(())
    }

    /// Activates or deactivates a definition. Activation re-checks the range.
    pub fn set_active(
        &mut self,
        id: &str,
        is_active: bool,
    ) -> Result<PackageDefinition, StoreError> {
        let mut package = self
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if is_active && !package.is_active {
            self.ensure_no_overlap(package.quantity_range(), Some(id))?;
        }
        package.is_active = is_active;

        if let Err(err) = self.backend.update(package) {
            return Err(self.reload_after_failure("set_active", err));
        }
        self.refresh()?;
        tracing::info!(package_id = %id, is_active, "Package activation changed");

        self.get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Makes `id` the only default definition.
    pub fn set_default(&mut self, id: &str) -> Result<PackageDefinition, StoreError> {
        if self.get(id).is_none() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        if let Err(err) = self.backend.set_default(id) {
            return Err(self.reload_after_failure("set_default", err));
        }
        self.refresh()?;
        tracing::info!(package_id = %id, "Default package changed");

        self.get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Rewrites `sort_order` to match `ordered_ids`, which must name every
    /// definition exactly once.
    ///
    /// Writes happen one per definition. If one fails, earlier writes stay
    /// in place and the view is reloaded from the backend before the error
    /// is returned.
    pub fn reorder<S: AsRef<str>>(&mut self, ordered_ids: &[S]) -> Result<(), StoreError> {
        self.check_order(ordered_ids)?;

        for assignment in reorder_assignments(ordered_ids) {
            if let Err(err) = self
                .backend
                .set_sort_order(&assignment.id, assignment.sort_order)
            {
                tracing::warn!(package_id = %assignment.id, "Reorder failed midway");
                return Err(self.reload_after_failure("reorder", err));
            }
        }

        self.refresh()?;
        tracing::info!(count = ordered_ids.len(), "Packages reordered");
        Ok(())
    }

    /// Inserts every draft of a seed catalog, in order.
    pub fn seed(&mut self, drafts: Vec<PackageDraft>) -> Result<usize, StoreError> {
        let count = drafts.len();
        for draft in drafts {
            self.create(draft)?;
        }
        Ok(count)
    }

    /// Reloads the view after a backend write failed. Earlier writes of the
    /// same operation may have landed.
    fn reload_after_failure(&mut self, operation: &'static str, err: StoreError) -> StoreError {
        tracing::warn!(operation, error = %err, "Package write failed, reloading packages");
        if let Err(reload_err) = self.refresh() {
            tracing::error!(operation, error = %reload_err, "Reload after failed write failed");
        }
        err
    }

    fn ensure_no_overlap(
        &self,
        candidate: QuantityRange,
        exclude_id: Option<&str>,
    ) -> Result<(), StoreError> {
        let check = self.validate_range(candidate, exclude_id);
        if check.valid {
            return Ok(());
        }
        Err(StoreError::RangeConflict {
            message: check
                .message
                .unwrap_or_else(|| format!("Quantity range {} overlaps", candidate)),
            conflicting_name: check.conflicting_name.unwrap_or_default(),
        })
    }

    fn check_order<S: AsRef<str>>(&self, ordered_ids: &[S]) -> Result<(), StoreError> {
        let mut seen = HashSet::new();
        for id in ordered_ids {
            let id = id.as_ref();
            if self.get(id).is_none() {
                return Err(StoreError::InvalidOrder(format!("Unknown package id: {}", id)));
            }
            if !seen.insert(id) {
                return Err(StoreError::InvalidOrder(format!("Duplicate package id: {}", id)));
            }
        }
        if seen.len() != self.packages.len() {
            return Err(StoreError::InvalidOrder(format!(
                "Expected {} package ids, got {}",
                self.packages.len(),
                seen.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::model::fixtures::draft;

    /// Memory backend whose sort-order writes start failing after `budget`
    /// calls. With `default_fails` every default switch times out.
    struct FlakyBackend {
        inner: MemoryBackend,
        budget: usize,
        default_fails: bool,
    }

    impl FlakyBackend {
        fn failing_default() -> Self {
            Self {
                inner: MemoryBackend::new(),
                budget: usize::MAX,
                default_fails: true,
            }
        }
    }

    impl PackageBackend for FlakyBackend {
        fn list(&self) -> Result<Vec<PackageDefinition>, StoreError> {
            self.inner.list()
        }

        fn insert(&mut self, package: PackageDefinition) -> Result<(), StoreError> {
            self.inner.insert(package)
        }

        fn update(&mut self, package: PackageDefinition) -> Result<(), StoreError> {
            self.inner.update(package)
        }

        fn delete(&mut self, id: &str) -> Result<(), StoreError> {
            self.inner.delete(id)
        }

        fn set_sort_order(&mut self, id: &str, sort_order: i64) -> Result<(), StoreError> {
            if self.budget == 0 {
                return Err(StoreError::Backend("connection reset".to_string()));
            }
            self.budget -= 1;
            self.inner.set_sort_order(id, sort_order)
        }

        fn set_default(&mut self, id: &str) -> Result<(), StoreError> {
            if self.default_fails {
                return Err(StoreError::Backend("timeout".to_string()));
            }
            self.inner.set_default(id)
        }
    }

    fn seeded_store() -> PackageStore<MemoryBackend> {
        let mut store = PackageStore::load(MemoryBackend::new()).unwrap();
        let mut large = draft("Large", 11, 20);
        large.is_default = true;
        store
            .seed(vec![draft("Small", 1, 4), draft("Medium", 5, 10), large])
            .unwrap();
        store
    }

    fn names(store: &PackageStore<impl PackageBackend>) -> Vec<String> {
        store.list().iter().map(|p| p.name.clone()).collect()
    }

    fn id_of(store: &PackageStore<impl PackageBackend>, name: &str) -> String {
        store
            .list()
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.id.clone())
            .unwrap()
    }

    fn defaults(store: &PackageStore<impl PackageBackend>) -> Vec<String> {
        store
            .list()
            .iter()
            .filter(|p| p.is_default)
            .map(|p| p.name.clone())
            .collect()
    }

    #[test]
    fn create_appends_in_order() {
        let store = seeded_store();
        assert_eq!(names(&store), vec!["Small", "Medium", "Large"]);
        let orders: Vec<i64> = store.list().iter().map(|p| p.sort_order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
        assert_eq!(defaults(&store), vec!["Large"]);
    }

    #[test]
    fn create_rejects_overlapping_active_range() {
        let mut store = seeded_store();
        let err = store.create(draft("Odd", 3, 6)).unwrap_err();
        match err {
            StoreError::RangeConflict {
                conflicting_name, ..
            } => assert_eq!(conflicting_name, "Small"),
            other => panic!("Unexpected error: {:?}", other),
        }
        assert_eq!(store.list().len(), 3);
    }

    #[test]
    fn inactive_draft_skips_overlap_check() {
        let mut store = seeded_store();
        let mut odd = draft("Odd", 3, 6);
        odd.is_active = false;
        let created = store.create(odd).unwrap();
        assert!(!created.is_active);
        assert_eq!(store.active().len(), 3);
    }

    #[test]
    fn create_rejects_invalid_fields() {
        let mut store = seeded_store();
        let mut bad = draft("Flat", 30, 40);
        bad.width = -2.0;
        assert!(matches!(
            store.create(bad),
            Err(StoreError::Validation(ValidationError::InvalidDimension(_)))
        ));
    }

    #[test]
    fn update_excludes_itself_from_overlap_check() {
        let mut store = seeded_store();
        let medium = id_of(&store, "Medium");
        let updated = store.update(&medium, draft("Medium", 5, 9)).unwrap();
        assert_eq!(updated.max_quantity, 9);

        let err = store.update(&medium, draft("Medium", 4, 9)).unwrap_err();
        assert!(matches!(err, StoreError::RangeConflict { .. }));
        assert_eq!(store.get(&medium).unwrap().min_quantity, 5);
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let mut store = seeded_store();
        assert!(matches!(
            store.update("missing", draft("X", 50, 60)),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn setting_default_clears_previous_one() {
        let mut store = seeded_store();
        let small = id_of(&store, "Small");
        store.set_default(&small).unwrap();
        assert_eq!(defaults(&store), vec!["Small"]);

        let mut medium_draft = draft("Medium", 5, 10);
        medium_draft.is_default = true;
        let medium = id_of(&store, "Medium");
        store.update(&medium, medium_draft).unwrap();
        assert_eq!(defaults(&store), vec!["Medium"]);

        let mut crate_draft = draft("Crate", 21, 40);
        crate_draft.is_default = true;
        store.create(crate_draft).unwrap();
        assert_eq!(defaults(&store), vec!["Crate"]);
    }

    #[test]
    fn default_exclusivity_covers_inactive_definitions() {
        let mut store = seeded_store();
        let large = id_of(&store, "Large");
        store.set_active(&large, false).unwrap();
        let small = id_of(&store, "Small");
        store.set_default(&small).unwrap();
        assert!(!store.get(&large).unwrap().is_default);
    }

    #[test]
    fn reactivation_rechecks_range() {
        let mut store = seeded_store();
        let small = id_of(&store, "Small");
        store.set_active(&small, false).unwrap();
        store.create(draft("Starter", 1, 3)).unwrap();

        let err = store.set_active(&small, true).unwrap_err();
        assert!(matches!(err, StoreError::RangeConflict { .. }));
        assert!(!store.get(&small).unwrap().is_active);
    }

    #[test]
    fn delete_removes_definition() {
        let mut store = seeded_store();
        let medium = id_of(&store, "Medium");
        store.delete(&medium).unwrap();
        assert_eq!(names(&store), vec!["Small", "Large"]);
        assert!(matches!(store.delete(&medium), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn reorder_rewrites_positions() {
        let mut store = seeded_store();
        let ids = vec![
            id_of(&store, "Large"),
            id_of(&store, "Small"),
            id_of(&store, "Medium"),
        ];
        store.reorder(&ids).unwrap();
        assert_eq!(names(&store), vec!["Large", "Small", "Medium"]);
        let orders: Vec<i64> = store.list().iter().map(|p| p.sort_order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn reorder_requires_every_id_once() {
        let mut store = seeded_store();
        let small = id_of(&store, "Small");
        let medium = id_of(&store, "Medium");
        assert!(matches!(
            store.reorder(&[small.clone(), medium.clone()]),
            Err(StoreError::InvalidOrder(_))
        ));
        assert!(matches!(
            store.reorder(&[small.clone(), medium, small]),
            Err(StoreError::InvalidOrder(_))
        ));
        assert!(matches!(
            store.reorder(&["nope"]),
            Err(StoreError::InvalidOrder(_))
        ));
    }

    #[test]
    fn failed_reorder_reloads_from_backend() {
        let mut store = PackageStore::load(FlakyBackend {
            inner: MemoryBackend::new(),
            budget: 1,
            default_fails: false,
        })
        .unwrap();
        store
            .seed(vec![draft("Small", 1, 4), draft("Medium", 5, 10), draft("Large", 11, 20)])
            .unwrap();

        let ids = vec![
            id_of(&store, "Large"),
            id_of(&store, "Small"),
            id_of(&store, "Medium"),
        ];
        let err = store.reorder(&ids).unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));

        // Only the first write landed: Large moved to 0, colliding with Small.
        let mut persisted = store.backend().list().unwrap();
        persisted.sort_by_key(|p| p.sort_order);
        let view: Vec<(String, i64)> = store
            .list()
            .iter()
            .map(|p| (p.id.clone(), p.sort_order))
            .collect();
        let truth: Vec<(String, i64)> = persisted
            .iter()
            .map(|p| (p.id.clone(), p.sort_order))
            .collect();
        assert_eq!(view, truth);
        assert_eq!(store.get(&ids[0]).unwrap().sort_order, 0);
    }

    #[test]
    fn failed_default_switch_on_create_keeps_view_in_sync() {
        let mut store = PackageStore::load(FlakyBackend::failing_default()).unwrap();
        let mut first = draft("A", 1, 4);
        first.is_default = true;
        assert!(matches!(store.create(first), Err(StoreError::Backend(_))));

        // The insert landed before the default switch failed.
        assert_eq!(store.list().len(), store.backend().list().unwrap().len());
        assert_eq!(names(&store), vec!["A"]);
        assert!(defaults(&store).is_empty());

        match store.create(draft("B", 1, 4)).unwrap_err() {
            StoreError::RangeConflict {
                conflicting_name, ..
            } => assert_eq!(conflicting_name, "A"),
            other => panic!("Unexpected error: {:?}", other),
        }
        assert_eq!(store.backend().list().unwrap().len(), 1);
    }

    #[test]
    fn failed_default_switch_on_update_keeps_view_in_sync() {
        let mut store = PackageStore::load(FlakyBackend::failing_default()).unwrap();
        store.create(draft("A", 1, 4)).unwrap();
        let b = store.create(draft("B", 5, 8)).unwrap();

        let mut widened = draft("B", 5, 12);
        widened.is_default = true;
        assert!(matches!(
            store.update(&b.id, widened),
            Err(StoreError::Backend(_))
        ));
        assert_eq!(store.get(&b.id).unwrap().max_quantity, 12);

        match store.create(draft("C", 10, 11)).unwrap_err() {
            StoreError::RangeConflict {
                conflicting_name, ..
            } => assert_eq!(conflicting_name, "B"),
            other => panic!("Unexpected error: {:?}", other),
        }
    }

    #[test]
    fn reorder_assignments_are_positional() {
        let assignments = reorder_assignments(&["c", "a", "b"]);
        assert_eq!(
            assignments,
            vec![
                SortAssignment {
                    id: "c".to_string(),
                    sort_order: 0
                },
                SortAssignment {
                    id: "a".to_string(),
                    sort_order: 1
                },
                SortAssignment {
                    id: "b".to_string(),
                    sort_order: 2
                },
            ]
        );
    }

    #[test]
    fn validate_range_uses_current_catalog() {
        let store = seeded_store();
        assert!(!store.validate_range(QuantityRange::new(3, 6), None).valid);
        let small = id_of(&store, "Small");
        assert!(store.validate_range(QuantityRange::new(1, 3), Some(&small)).valid);
        assert!(store.validate_range(QuantityRange::new(21, 30), None).valid);
    }

    #[test]
    fn seed_catalog_loads_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"name": "Small", "length": 12, "width": 10, "height": 8,
                  "empty_weight": 0.6, "min_quantity": 1, "max_quantity": 4}},
                {{"name": "Large", "length": 24, "width": 18, "height": 18,
                  "empty_weight": 2.4, "min_quantity": 5, "max_quantity": 20,
                  "is_default": true}}
            ]"#
        )
        .unwrap();

        let drafts = load_seed_catalog(file.path()).unwrap();
        assert_eq!(drafts.len(), 2);
        assert!(drafts[1].is_default);

        let mut store = PackageStore::load(MemoryBackend::new()).unwrap();
        assert_eq!(store.seed(drafts).unwrap(), 2);
        assert_eq!(defaults(&store), vec!["Large"]);
    }

    #[test]
    fn demo_catalog_is_consistent() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/nursery-packages.json");
        let drafts = load_seed_catalog(&path).unwrap();
        let mut store = PackageStore::load(MemoryBackend::new()).unwrap();
        assert_eq!(store.seed(drafts).unwrap(), 3);
        assert_eq!(defaults(&store), vec!["Large Box"]);
    }

    #[test]
    fn seed_catalog_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            load_seed_catalog(file.path()),
            Err(StoreError::Seed(_))
        ));
    }
}
