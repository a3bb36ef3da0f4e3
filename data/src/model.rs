//! Declarative model schema for the fixture database.
//!
//! A `DatabaseDefinition` maps model names to `ModelDefinition`s, each an ordered field
//! dictionary of generators and relation markers. Definitions can also be deferred
//! behind a closure that runs once when the database is created.

use std::{fmt, sync::Arc};

use serde::Serialize;
use serde_json::Value;

/// A concrete fixture record: an ordered JSON object.
pub type Record = serde_json::Map<String, Value>;

/// Zero-argument field generator producing a JSON value.
pub type Generator = Arc<dyn Fn() -> Result<Value, serde_json::Error> + Send + Sync>;

/// Definition of a single model field.
#[derive(Clone)]
pub enum FieldDefinition {
    /// Plain value produced by a generator on every `create` not overriding the field.
    Generator(Generator),

    /// Generator marked as the model's primary key.
    PrimaryKey(Generator),

    /// To-one relation to a record of the named model.
    OneOf(String),

    /// To-many relation to records of the named model.
    ManyOf(String),
}

impl FieldDefinition {
    /// Wraps a closure returning any serializable value into a field generator.
    pub fn generator<T, F>(generate: F) -> Self
    where
        T: Serialize,
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::Generator(into_generator(generate))
    }

    /// Wraps a closure into a primary-key generator.
    pub fn primary_key<T, F>(generate: F) -> Self
    where
        T: Serialize,
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::PrimaryKey(into_generator(generate))
    }

    /// Model targeted by a relation field, `None` for generator fields.
    pub fn relation_target(&self) -> Option<&str> {
        match self {
            Self::OneOf(target) | Self::ManyOf(target) => Some(target),
            Self::Generator(_) | Self::PrimaryKey(_) => None,
        }
    }
}

impl fmt::Debug for FieldDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generator(_) => f.write_str("Generator"),
            Self::PrimaryKey(_) => f.write_str("PrimaryKey"),
            Self::OneOf(target) => f.debug_tuple("OneOf").field(target).finish(),
            Self::ManyOf(target) => f.debug_tuple("ManyOf").field(target).finish(),
        }
    }
}

fn into_generator<T, F>(generate: F) -> Generator
where
    T: Serialize,
    F: Fn() -> T + Send + Sync + 'static,
{
    Arc::new(move || serde_json::to_value(generate()))
}

/// Ordered field dictionary describing one model.
///
/// Fields keep their declaration order, which is also the key order of created
/// records. Declaring a field name twice replaces the earlier definition in place.
///
/// # Example
///
/// ```rust,ignore
/// let project = ModelDefinition::new()
///     .field("id", || generate_id("project-pk"))
///     .field("name", || "Project")
///     .one_of("user", "user")
///     .many_of("toDos", "toDo");
/// ```
#[derive(Clone, Debug, Default)]
pub struct ModelDefinition {
    fields: Vec<(String, FieldDefinition)>,
}

impl ModelDefinition {
    /// Creates a model with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a generator field.
    ///
    /// A generator field named `id` becomes the model's primary key during normalization.
    ///
    /// # Arguments
    /// - `name` - Field name
    /// - `generate` - Closure producing the field value for each created record
    ///
    /// # Returns
    /// - `Self` - Definition for method chaining
    pub fn field<T, F>(self, name: impl Into<String>, generate: F) -> Self
    where
        T: Serialize,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.with(name, FieldDefinition::generator(generate))
    }

    /// Adds a generator field explicitly marked as the primary key.
    pub fn primary_key<T, F>(self, name: impl Into<String>, generate: F) -> Self
    where
        T: Serialize,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.with(name, FieldDefinition::primary_key(generate))
    }

    /// Adds a to-one relation to a record of `target`.
    pub fn one_of(self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.with(name, FieldDefinition::OneOf(target.into()))
    }

    /// Adds a to-many relation to records of `target`.
    pub fn many_of(self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.with(name, FieldDefinition::ManyOf(target.into()))
    }

    /// Adds an arbitrary field definition.
    pub fn with(mut self, name: impl Into<String>, definition: FieldDefinition) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some((_, existing)) => *existing = definition,
            None => self.fields.push((name, definition)),
        }
        self
    }

    /// Looks up a field definition by name.
    pub fn get(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, definition)| definition)
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldDefinition)> {
        self.fields
            .iter()
            .map(|(name, definition)| (name.as_str(), definition))
    }

    pub(crate) fn into_fields(self) -> Vec<(String, FieldDefinition)> {
        self.fields
    }
}

/// Source of a model definition: ready, or produced by a closure at database creation.
pub(crate) enum ModelSource {
    Ready(ModelDefinition),
    Deferred(Box<dyn FnOnce() -> ModelDefinition>),
}

impl ModelSource {
    pub(crate) fn into_definition(self) -> ModelDefinition {
        match self {
            Self::Ready(definition) => definition,
            Self::Deferred(define) => define(),
        }
    }
}

/// Ordered mapping from model name to its definition.
#[derive(Default)]
pub struct DatabaseDefinition {
    models: Vec<(String, ModelSource)>,
}

impl DatabaseDefinition {
    /// Creates an empty database definition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a model.
    ///
    /// # Arguments
    /// - `name` - Model name used to look up its collection
    /// - `definition` - Field dictionary of the model
    ///
    /// # Returns
    /// - `Self` - Definition for method chaining
    pub fn model(self, name: impl Into<String>, definition: ModelDefinition) -> Self {
        self.with_source(name.into(), ModelSource::Ready(definition))
    }

    /// Declares a model whose field dictionary is produced when the database is created.
    ///
    /// The closure runs exactly once, during `create_database`. Useful when building the
    /// definition has side effects that should not run at declaration time.
    pub fn deferred_model<F>(self, name: impl Into<String>, define: F) -> Self
    where
        F: FnOnce() -> ModelDefinition + 'static,
    {
        self.with_source(name.into(), ModelSource::Deferred(Box::new(define)))
    }

    /// Declared model names in order.
    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|(name, _)| name.as_str())
    }

    fn with_source(mut self, name: String, source: ModelSource) -> Self {
        match self.models.iter_mut().find(|(model, _)| *model == name) {
            Some((_, existing)) => *existing = source,
            None => self.models.push((name, source)),
        }
        self
    }

    pub(crate) fn into_models(self) -> Vec<(String, ModelSource)> {
        self.models
    }
}
