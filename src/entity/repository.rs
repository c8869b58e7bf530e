//! EntityRepository - the create/save pipeline for short-identified entities.

use std::sync::Arc;

use tracing::debug;

use super::{assign_short_id, EntityError, ShortIdentified};
use crate::clock::Clock;
use crate::counter::{CounterAllocator, CounterStore};
use crate::document::{new_id, DocumentError, DocumentStore, Versioned};

/// Persists short-identified entities, assigning short IDs on first save.
#[derive(Clone)]
pub struct EntityRepository<S, C> {
    documents: S,
    allocator: CounterAllocator<C>,
    clock: Arc<dyn Clock>,
}

impl<S: DocumentStore, C: CounterStore> EntityRepository<S, C> {
    pub fn new(documents: S, allocator: CounterAllocator<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            documents,
            allocator,
            clock,
        }
    }

    /// Create a new entity.
    ///
    /// The short ID is allocated before the write and stored by the same
    /// insert. If the insert fails the allocated value stays consumed.
    pub fn create<M: ShortIdentified>(&self, mut entity: M) -> Result<Versioned<M>, EntityError> {
        if entity.id().is_empty() {
            entity.set_id(new_id());
        }
        let now = self.clock.now();
        entity.before_save(now);
        assign_short_id(&mut entity, &self.allocator, self.clock.as_ref())?;

        let timestamps = entity.timestamps_mut();
        timestamps.created_at = Some(now);
        timestamps.updated_at = Some(now);

        let created = self.documents.insert(&entity)?;
        debug!(
            collection = M::COLLECTION,
            id = created.data.id(),
            short_id = created.data.short_id(),
            "created entity"
        );
        Ok(created)
    }

    /// Save changes to an existing entity if it is still at `expected_version`.
    ///
    /// The short ID is immutable: a save that changes or clears it is
    /// rejected. A stored record that never got a short ID (inserted around
    /// this repository) receives one now.
    pub fn save<M: ShortIdentified>(
        &self,
        mut entity: M,
        expected_version: u64,
    ) -> Result<Versioned<M>, EntityError> {
        let stored = self
            .documents
            .get::<M>(entity.id())?
            .ok_or_else(|| DocumentError::NotFound {
                collection: M::COLLECTION.to_string(),
                id: entity.id().to_string(),
            })?;
        if let Some(assigned) = stored.data.short_id().filter(|short_id| !short_id.is_empty()) {
            if entity.short_id() != Some(assigned) {
                return Err(EntityError::ShortIdImmutable {
                    collection: M::COLLECTION.to_string(),
                    id: entity.id().to_string(),
                });
            }
        }

        let now = self.clock.now();
        entity.before_save(now);
        assign_short_id(&mut entity, &self.allocator, self.clock.as_ref())?;
        entity.timestamps_mut().updated_at = Some(now);

        Ok(self.documents.update(&entity, expected_version)?)
    }

    pub fn get<M: ShortIdentified>(&self, id: &str) -> Result<Option<Versioned<M>>, EntityError> {
        Ok(self.documents.get(id)?)
    }

    pub fn get_by_short_id<M: ShortIdentified>(
        &self,
        short_id: &str,
    ) -> Result<Option<Versioned<M>>, EntityError> {
        self.find_unique(M::SHORT_ID_KEY, short_id)
    }

    /// The record whose unique key `field` holds `value`, through the store's index.
    pub fn find_unique<M: ShortIdentified>(
        &self,
        field: &str,
        value: &str,
    ) -> Result<Option<Versioned<M>>, EntityError> {
        Ok(self.documents.find_unique::<M>(field, value)?)
    }

    /// Like `get_by_short_id`, but a missing record is an error.
    pub fn require<M: ShortIdentified>(&self, short_id: &str) -> Result<Versioned<M>, EntityError> {
        self.get_by_short_id(short_id)?
            .ok_or_else(|| EntityError::NotFound {
                collection: M::COLLECTION,
                short_id: short_id.to_string(),
            })
    }

    /// All records, in insertion order.
    pub fn list<M: ShortIdentified>(&self) -> Result<Vec<Versioned<M>>, EntityError> {
        Ok(self.documents.find::<M>(&|_| true)?)
    }

    pub fn find<M: ShortIdentified>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Vec<Versioned<M>>, EntityError> {
        Ok(self.documents.find(predicate)?)
    }

    pub fn count<M: ShortIdentified>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<usize, EntityError> {
        Ok(self.documents.count(predicate)?)
    }

    /// Load the record with `short_id`, apply `change`, and save it.
    pub fn update_by_short_id<M, F>(&self, short_id: &str, change: F) -> Result<Versioned<M>, EntityError>
    where
        M: ShortIdentified,
        F: FnOnce(&mut M) -> Result<(), EntityError>,
    {
        let Versioned { mut data, version } = self.require::<M>(short_id)?;
        change(&mut data)?;
        self.save(data, version)
    }

    /// Delete the record with `short_id`. Returns false if there was none.
    ///
    /// The counter is not touched; a deleted record's short ID is never reissued.
    pub fn delete_by_short_id<M: ShortIdentified>(&self, short_id: &str) -> Result<bool, EntityError> {
        match self.get_by_short_id::<M>(short_id)? {
            Some(existing) => Ok(self.documents.delete::<M>(existing.data.id())?),
            None => Ok(false),
        }
    }

    pub fn documents(&self) -> &S {
        &self.documents
    }

    pub fn allocator(&self) -> &CounterAllocator<C> {
        &self.allocator
    }
}
