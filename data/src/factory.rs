//! Fixture database construction.
//!
//! Normalizes every model so it carries exactly one primary key and validates that
//! relation markers point at declared models. The resulting `Database` hands out one
//! `Collection` per model.

use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    collection::Collection,
    error::DataError,
    id::IdGenerator,
    model::{DatabaseDefinition, FieldDefinition, ModelDefinition, Record},
    ID_FIELD, PRIMARY_KEY_FIELD,
};

/// Normalized model together with the records created for it.
pub(crate) struct ModelStore {
    pub(crate) name: String,
    pub(crate) primary_key: String,
    pub(crate) fields: Vec<(String, FieldDefinition)>,
    pub(crate) records: Mutex<Vec<Record>>,
}

/// In-memory fixture database holding one collection per declared model.
pub struct Database {
    models: Vec<ModelStore>,
}

impl Database {
    /// Returns the collection of the named model.
    ///
    /// # Arguments
    /// - `name` - Model name as declared in the `DatabaseDefinition`
    ///
    /// # Returns
    /// - `Ok(Collection)` - Handle exposing `create` and queries for the model
    /// - `Err(DataError::UnknownModel)` - No model with this name was declared
    pub fn model(&self, name: &str) -> Result<Collection<'_>, DataError> {
        self.store(name)
            .map(|store| Collection::new(self, store))
            .ok_or_else(|| DataError::UnknownModel(name.to_string()))
    }

    /// Declared model names in order.
    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|store| store.name.as_str())
    }

    /// Whether a model with this name exists.
    pub fn has_model(&self, name: &str) -> bool {
        self.store(name).is_some()
    }

    pub(crate) fn store(&self, name: &str) -> Option<&ModelStore> {
        self.models.iter().find(|store| store.name == name)
    }
}

/// Creates a fixture database whose synthesized primary keys use the process-wide
/// `IdGenerator`.
///
/// Shorthand for `create_database_with(definition, IdGenerator::global())`.
pub fn create_database(definition: DatabaseDefinition) -> Result<Database, DataError> {
    create_database_with(definition, IdGenerator::global())
}

/// Creates a fixture database using an explicit ID generator for synthesized primary keys.
///
/// Deferred model definitions are evaluated here, once each, in declaration order.
/// Models without a primary key receive a `__pk` field whose generator returns the next
/// value of the `"<model>-pk"` counter.
///
/// # Arguments
/// - `definition` - Model names and field dictionaries
/// - `ids` - Counter registry backing the synthesized `__pk` generators
///
/// # Returns
/// - `Ok(Database)` - Database with one collection per model
/// - `Err(DataError::UnknownRelationTarget)` - A relation marker names an undeclared model
pub fn create_database_with(
    definition: DatabaseDefinition,
    ids: &IdGenerator,
) -> Result<Database, DataError> {
    let models: Vec<ModelStore> = definition
        .into_models()
        .into_iter()
        .map(|(name, source)| normalize(name, source.into_definition(), ids))
        .collect();

    for store in &models {
        for (field, definition) in &store.fields {
            if let Some(target) = definition.relation_target() {
                if !models.iter().any(|model| model.name == target) {
                    return Err(DataError::UnknownRelationTarget {
                        model: store.name.clone(),
                        field: field.clone(),
                        target: target.to_string(),
                    });
                }
            }
        }
    }

    debug!(models = models.len(), "Created fixture database");

    Ok(Database { models })
}

/// Ensures the model has exactly one primary-key field.
///
/// An explicit `PrimaryKey` field wins, then a generator named `id`, otherwise a `__pk`
/// counter field is prepended.
fn normalize(name: String, definition: ModelDefinition, ids: &IdGenerator) -> ModelStore {
    let mut fields = definition.into_fields();

    let explicit: Vec<usize> = fields
        .iter()
        .enumerate()
        .filter(|(_, (_, definition))| matches!(definition, FieldDefinition::PrimaryKey(_)))
        .map(|(index, _)| index)
        .collect();

    let primary_key = if let Some((&first, rest)) = explicit.split_first() {
        for &index in rest {
            let (field, definition) = &mut fields[index];
            warn!(model = %name, field = %field, "Demoting extra primary key to plain field");
            if let FieldDefinition::PrimaryKey(generate) = definition {
                *definition = FieldDefinition::Generator(generate.clone());
            }
        }
        fields[first].0.clone()
    } else if let Some((field, definition)) = fields
        .iter_mut()
        .find(|(field, definition)| field == ID_FIELD && matches!(definition, FieldDefinition::Generator(_)))
    {
        if let FieldDefinition::Generator(generate) = definition {
            *definition = FieldDefinition::PrimaryKey(generate.clone());
        }
        field.clone()
    } else {
        let ids = ids.clone();
        let cache_key = format!("{name}-pk");
        debug!(model = %name, "Synthesizing {} primary key", PRIMARY_KEY_FIELD);
        fields.insert(
            0,
            (
                PRIMARY_KEY_FIELD.to_string(),
                FieldDefinition::PrimaryKey(Arc::new(move || {
                    Ok(Value::from(ids.generate(&cache_key)))
                })),
            ),
        );
        PRIMARY_KEY_FIELD.to_string()
    };

    ModelStore {
        name,
        primary_key,
        fields,
        records: Mutex::new(Vec::new()),
    }
}
