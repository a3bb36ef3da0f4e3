//! Error types raised while configuring or invoking a renderer.
//!
//! `RendererError` is the top-level error returned by `build()` and by every render
//! invocation. Configuration problems are grouped in `ConfigError` and converted with
//! `#[from]`. Nothing is retried: any failure is meant to fail the test immediately.

use thiserror::Error;

/// Top-level renderer error.
#[derive(Error, Debug)]
pub enum RendererError {
    /// Required builder configuration is missing at `build()` time.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A data or props generator returned an error.
    ///
    /// # Fields
    /// - `name` - Data field name, or `"props"` for the props definition
    /// - `source` - Error returned by the generator
    #[error("Generator for {name} failed: {source}")]
    Generator {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A data field was read but never declared or resolved.
    #[error("Data field {0} is not defined")]
    MissingField(String),

    /// Props serialized to something other than a JSON object, so overrides cannot be
    /// merged by key.
    #[error("Props must serialize to a JSON object to accept overrides")]
    PropsNotObject,

    /// Props changed when converted to JSON and back, so overrides would drop the
    /// fields JSON does not carry, such as `#[serde(skip)]` fields.
    #[error("Props must convert to JSON and back unchanged to accept overrides")]
    PropsNotRoundTrip,

    /// Conversion between typed values and JSON failed.
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

/// Builder configuration errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `set_component` was never called.
    #[error("Component is not set")]
    MissingComponent,

    /// `set_render_function` was never called.
    #[error("Render function is not set")]
    MissingRenderFunction,
}
