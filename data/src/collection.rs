//! Per-model collection handle: record creation and simple queries.

use std::sync::PoisonError;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};

use crate::{
    error::DataError,
    factory::{Database, ModelStore},
    model::{FieldDefinition, Record},
};

/// Handle to the records of one model.
///
/// Obtained from `Database::model`. Creating a record runs the generator of every
/// field the overrides do not supply, once per call, in declaration order.
#[derive(Clone, Copy)]
pub struct Collection<'db> {
    db: &'db Database,
    store: &'db ModelStore,
}

impl<'db> Collection<'db> {
    pub(crate) fn new(db: &'db Database, store: &'db ModelStore) -> Self {
        Self { db, store }
    }

    /// Model name of this collection.
    pub fn name(&self) -> &str {
        &self.store.name
    }

    /// Name of the primary-key field, `id` or `__pk` in most models.
    pub fn primary_key(&self) -> &str {
        &self.store.primary_key
    }

    /// Creates a record using generators for every field.
    pub fn create_default(&self) -> Result<Record, DataError> {
        self.create(Value::Null)
    }

    /// Creates a record, taking field values from `overrides` where present.
    ///
    /// Relation fields take already-created records: an object for to-one relations,
    /// an array of objects for to-many relations. Each related record is looked up by
    /// primary key in its collection and stored nested in the new record. Unset to-one
    /// relations are `null` and unset to-many relations are empty arrays. Keys that are
    /// not fields of the model are ignored.
    ///
    /// # Arguments
    /// - `overrides` - JSON object of field values, or `null` for none
    ///
    /// # Returns
    /// - `Ok(Record)` - The stored record
    /// - `Err(DataError::InvalidOverrides)` - Overrides were not an object
    /// - `Err(DataError::DuplicatePrimaryKey)` - Primary key already taken in this collection
    /// - `Err(DataError::MissingPrimaryKey)` - Primary key resolved to `null`
    /// - `Err(DataError::InvalidRelation)` / `Err(DataError::RelationNotFound)` - Bad
    ///   relation override
    pub fn create(&self, overrides: Value) -> Result<Record, DataError> {
        let mut overrides = match overrides {
            Value::Object(map) => map,
            Value::Null => Record::new(),
            _ => return Err(DataError::InvalidOverrides(self.store.name.clone())),
        };

        let mut record = Record::new();
        for (field, definition) in &self.store.fields {
            let value = match (definition, overrides.remove(field)) {
                (FieldDefinition::OneOf(target), Some(value)) => {
                    self.resolve_one(field, target, value)?
                }
                (FieldDefinition::ManyOf(target), Some(value)) => {
                    self.resolve_many(field, target, value)?
                }
                (_, Some(value)) => value,
                (FieldDefinition::Generator(generate), None)
                | (FieldDefinition::PrimaryKey(generate), None) => generate()?,
                (FieldDefinition::OneOf(_), None) => Value::Null,
                (FieldDefinition::ManyOf(_), None) => Value::Array(Vec::new()),
            };
            trace!(model = %self.store.name, field = %field, "Resolved fixture field");
            record.insert(field.clone(), value);
        }

        for ignored in overrides.keys() {
            debug!(model = %self.store.name, field = %ignored, "Ignoring override for undeclared field");
        }

        let key = record
            .get(&self.store.primary_key)
            .filter(|key| !key.is_null())
            .cloned()
            .ok_or_else(|| DataError::MissingPrimaryKey {
                model: self.store.name.clone(),
                field: self.store.primary_key.clone(),
            })?;

        let mut records = self
            .store
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if records
            .iter()
            .any(|existing| existing.get(&self.store.primary_key) == Some(&key))
        {
            return Err(DataError::DuplicatePrimaryKey {
                model: self.store.name.clone(),
                key: key.to_string(),
            });
        }
        records.push(record.clone());

        Ok(record)
    }

    /// Creates a record and deserializes it into `T`.
    pub fn create_as<T: DeserializeOwned>(&self, overrides: Value) -> Result<T, DataError> {
        let record = self.create(overrides)?;

        Ok(serde_json::from_value(Value::Object(record))?)
    }

    /// Finds a record by primary key.
    pub fn find(&self, key: &Value) -> Option<Record> {
        self.store
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|record| record.get(&self.store.primary_key) == Some(key))
            .cloned()
    }

    /// All records created so far, in creation order.
    pub fn all(&self) -> Vec<Record> {
        self.store
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of records created so far.
    pub fn count(&self) -> usize {
        self.store
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn resolve_one(&self, field: &str, target: &str, value: Value) -> Result<Value, DataError> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::Object(related) => self.lookup(field, target, &related).map(Value::Object),
            _ => Err(self.invalid_relation(field, "expected a record object")),
        }
    }

    fn resolve_many(&self, field: &str, target: &str, value: Value) -> Result<Value, DataError> {
        let Value::Array(items) = value else {
            return Err(self.invalid_relation(field, "expected an array of records"));
        };

        items
            .into_iter()
            .map(|item| match item {
                Value::Object(related) => self.lookup(field, target, &related).map(Value::Object),
                _ => Err(self.invalid_relation(field, "expected an array of records")),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }

    /// Resolves a related record by primary key to its stored version.
    fn lookup(&self, field: &str, target: &str, related: &Record) -> Result<Record, DataError> {
        let collection = self.db.model(target)?;
        let key = related.get(collection.primary_key()).ok_or_else(|| {
            self.invalid_relation(
                field,
                &format!("related record has no {} field", collection.primary_key()),
            )
        })?;

        collection
            .find(key)
            .ok_or_else(|| DataError::RelationNotFound {
                model: self.store.name.clone(),
                field: field.to_string(),
                target: target.to_string(),
                key: key.to_string(),
            })
    }

    fn invalid_relation(&self, field: &str, reason: &str) -> DataError {
        DataError::InvalidRelation {
            model: self.store.name.clone(),
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}
