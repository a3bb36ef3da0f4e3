use thiserror::Error;

/// Errors raised by the fixture database while building models or creating records.
#[derive(Error, Debug)]
pub enum DataError {
    /// No model with this name was declared in the database definition.
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    /// A relation marker names a model that is not part of the database definition.
    ///
    /// Raised at database construction so a typo in a relation surfaces before any
    /// record is created.
    #[error("Relation {model}.{field} targets unknown model {target}")]
    UnknownRelationTarget {
        model: String,
        field: String,
        target: String,
    },

    /// A record with the same primary key already exists in the collection.
    #[error("Duplicate primary key {key} for model {model}")]
    DuplicatePrimaryKey { model: String, key: String },

    /// The primary key of a new record resolved to `null`.
    #[error("Primary key {field} of model {model} resolved to null")]
    MissingPrimaryKey { model: String, field: String },

    /// A relation override does not have the expected shape.
    ///
    /// To-one relations take a record object, to-many relations take an array of record
    /// objects, and every related record must carry the target model's primary key.
    #[error("Invalid value for relation {model}.{field}: {reason}")]
    InvalidRelation {
        model: String,
        field: String,
        reason: String,
    },

    /// A relation override references a record that was never created in the target model.
    #[error("Relation {model}.{field} references missing {target} record {key}")]
    RelationNotFound {
        model: String,
        field: String,
        target: String,
        key: String,
    },

    /// Overrides passed to `create` were neither an object nor `null`.
    #[error("Overrides for model {0} must be a JSON object")]
    InvalidOverrides(String),

    /// A field generator produced a value that failed to serialize, or a created record
    /// failed to deserialize into the requested type.
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}
