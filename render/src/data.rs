//! Named test data declared on a renderer.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{error::RendererError, util::MaybeFn};

/// Resolved data: an ordered JSON object keyed by data field name.
pub type Data = serde_json::Map<String, Value>;

/// A declared data field: a static value or a generator reading earlier fields.
pub type DataEntry = MaybeFn<Value, Data>;

/// Data fields declared with `add_data`, in declaration order.
///
/// Declaration order is resolution order: a generator only sees fields declared before
/// it. Redeclaring a name replaces the entry in place.
#[derive(Clone, Default)]
pub struct DataDefinitions {
    entries: Vec<(String, DataEntry)>,
}

impl DataDefinitions {
    /// Declared field names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Whether `name` is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(field, _)| field == name)
    }

    /// Static value of a field declared with `add_data_value`.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(field, _)| field == name)
            .and_then(|(_, entry)| match entry {
                MaybeFn::Value(value) => Some(value),
                MaybeFn::Fn(_) => None,
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn insert(&mut self, name: String, entry: DataEntry) {
        match self.entries.iter_mut().find(|(field, _)| *field == name) {
            Some((_, existing)) => *existing = entry,
            None => self.entries.push((name, entry)),
        }
    }

    pub(crate) fn entries(&self) -> Vec<(String, DataEntry)> {
        self.entries.clone()
    }
}

/// Typed access to resolved data fields.
pub trait DataExt {
    /// Deserializes the named field into `T`.
    ///
    /// # Returns
    /// - `Ok(T)` - Field value
    /// - `Err(RendererError::MissingField)` - No such field
    /// - `Err(RendererError::Serde)` - Value does not match `T`
    fn field<T: DeserializeOwned>(&self, name: &str) -> Result<T, RendererError>;
}

impl DataExt for Data {
    fn field<T: DeserializeOwned>(&self, name: &str) -> Result<T, RendererError> {
        let value = self
            .get(name)
            .cloned()
            .ok_or_else(|| RendererError::MissingField(name.to_string()))?;

        Ok(serde_json::from_value(value)?)
    }
}
