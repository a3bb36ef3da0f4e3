use dioxus_logger::tracing;
use serde_json::Value;

use crate::{data::Data, error::RendererError, util::MaybeFn};

/// Merges `overrides` into `original`, only for keys `original` already declares.
///
/// Keys absent from `original` are dropped, and so are `null` override values, which
/// keeps the original entry. Entry order is that of `original`.
///
/// # Arguments
/// - `original` - Declared entries in order
/// - `overrides` - Override values by key
/// - `into_entry` - Converts an override value into an entry
///
/// # Returns
/// - Entries of `original` with overridden ones replaced
pub fn override_predefined_keys<V>(
    mut original: Vec<(String, V)>,
    overrides: Data,
    into_entry: impl Fn(Value) -> V,
) -> Vec<(String, V)> {
    for (key, value) in overrides {
        if value.is_null() {
            tracing::debug!(key = %key, "Dropping null override");
            continue;
        }

        match original.iter_mut().find(|(name, _)| *name == key) {
            Some((_, entry)) => *entry = into_entry(value),
            None => tracing::debug!(key = %key, "Dropping override for undeclared key"),
        }
    }

    original
}

/// Resolves entries in order, passing each generator the values resolved before it.
pub fn resolve_in_order(
    entries: Vec<(String, MaybeFn<Value, Data>)>,
) -> Result<Data, RendererError> {
    entries
        .into_iter()
        .try_fold(Data::new(), |mut resolved, (name, entry)| {
            let value = entry.run_if_fn(&resolved)?;
            tracing::trace!(field = %name, "Resolved data field");
            resolved.insert(name, value);

            Ok(resolved)
        })
}
