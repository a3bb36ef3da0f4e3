//! Per-invocation overrides of data and props.
//!
//! Overrides are JSON values, never generators: an override replaces the declared
//! entry as a final value. Only declared names are overridden and `null` values are
//! ignored, see `util::override_predefined_keys`.

use std::rc::Rc;

use serde_json::Value;

use crate::{
    data::{Data, DataDefinitions},
    util::MaybeFn,
};

/// Override of data fields: fixed values or values derived from the declarations.
pub type DataOverride = MaybeFn<Data, DataDefinitions>;

/// Override of props: fixed values or values derived from the resolution context.
pub type PropsOverride<P> = MaybeFn<Data, PropsOverrideContext<P>>;

/// Arguments passed to a props override generator.
pub struct PropsOverrideContext<P> {
    /// Data fields as declared on the builder.
    pub initial_data: DataDefinitions,

    /// Props derived from the resolved data before overrides.
    pub initial_props: P,

    /// Data after overrides and resolution.
    pub next_data: Data,
}

/// Overrides applied to a single render invocation.
///
/// # Example
///
/// ```rust,ignore
/// let rendered = render_login
///     .render(
///         RenderOverrides::new()
///             .with_data("login", json!({ "email": "x@y.com" }))
///             .with_prop("disabled", true),
///     )
///     .await?;
/// ```
pub struct RenderOverrides<P> {
    pub(crate) data: Option<DataOverride>,
    pub(crate) props: Option<PropsOverride<P>>,
}

impl<P> Default for RenderOverrides<P> {
    fn default() -> Self {
        Self {
            data: None,
            props: None,
        }
    }
}

impl<P: 'static> RenderOverrides<P> {
    /// Creates an empty set of overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides one data field.
    ///
    /// Replaces a previous `data_with` generator.
    pub fn with_data(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut values = match self.data.take() {
            Some(MaybeFn::Value(values)) => values,
            _ => Data::new(),
        };
        values.insert(name.into(), value.into());
        self.data = Some(MaybeFn::Value(values));
        self
    }

    /// Overrides data fields with a fixed set of values.
    pub fn data(mut self, values: Data) -> Self {
        self.data = Some(MaybeFn::Value(values));
        self
    }

    /// Overrides data fields with values derived from the declared data.
    pub fn data_with<F>(mut self, derive: F) -> Self
    where
        F: Fn(&DataDefinitions) -> Data + 'static,
    {
        self.data = Some(MaybeFn::from_fn(derive));
        self
    }

    /// Overrides one prop.
    ///
    /// Replaces a previous `props_with` generator.
    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut values = match self.props.take() {
            Some(MaybeFn::Value(values)) => values,
            _ => Data::new(),
        };
        values.insert(name.into(), value.into());
        self.props = Some(MaybeFn::Value(values));
        self
    }

    /// Overrides props with a fixed set of values.
    pub fn props(mut self, values: Data) -> Self {
        self.props = Some(MaybeFn::Value(values));
        self
    }

    /// Overrides props with values derived from the declared data, the initial props
    /// and the resolved data.
    pub fn props_with<F>(mut self, derive: F) -> Self
    where
        F: Fn(&PropsOverrideContext<P>) -> Data + 'static,
    {
        self.props = Some(MaybeFn::Fn(Rc::new(move |context: &PropsOverrideContext<P>| {
            Ok(derive(context))
        })));
        self
    }
}
