//! Invocation of a built renderer: data and props resolution, render and remount.
//!
//! Each invocation runs, in order:
//! 1. data overrides are computed (fixed values or derived from the declarations)
//! 2. overrides replace declared data fields, for declared names only
//! 3. data fields resolve in declaration order
//! 4. props derive from the resolved data
//! 5. props overrides merge onto the props, for declared keys only; props must convert
//!    to JSON and back unchanged for a merge that changes anything
//! 6. `beforeRender` is emitted and awaited
//! 7. the render function is called
//! 8. `render` is emitted and awaited
//!
//! `Rendered::remount` renders again with the props of that invocation; steps 1-5 are
//! not repeated.

use std::rc::Rc;

use dioxus_logger::tracing;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    data::{Data, DataDefinitions, DataExt},
    error::RendererError,
    event::{Events, RendererEvent},
    overrides::{DataOverride, PropsOverride, PropsOverrideContext, RenderOverrides},
    ui::{Component, RenderFunction, RenderHandle, RenderOptions, Ui, Wrapper},
    util::{override_predefined_keys, resolve_in_order, MaybeFn},
};

/// Props given directly or derived from the resolved data.
pub type PropsDefinition<P> = MaybeFn<P, Data>;

/// Sealed renderer configuration.
pub(crate) struct RendererConfig<P, H> {
    pub(crate) data: DataDefinitions,
    pub(crate) props: Option<PropsDefinition<P>>,
    pub(crate) component: Component<P>,
    pub(crate) render_function: RenderFunction<P, H>,
    pub(crate) wrapper: Option<Wrapper>,
    pub(crate) events: Events<P>,
}

/// Built renderer, invoked once per test.
pub struct BoundRenderer<P, H> {
    config: Rc<RendererConfig<P, H>>,
}

impl<P, H> Clone for BoundRenderer<P, H> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
        }
    }
}

impl<P, H> BoundRenderer<P, H>
where
    P: Clone + PartialEq + Serialize + DeserializeOwned + 'static,
    H: RenderHandle,
{
    pub(crate) fn new(config: RendererConfig<P, H>) -> Self {
        Self {
            config: Rc::new(config),
        }
    }

    /// Renders with the declared data and props.
    pub async fn render_default(&self) -> Result<Rendered<P, H>, RendererError> {
        self.render(RenderOverrides::new()).await
    }

    /// Resolves data and props with `overrides` applied, then renders the component.
    ///
    /// # Arguments
    /// - `overrides` - Data and props overrides for this invocation
    ///
    /// # Returns
    /// - `Ok(Rendered)` - Resolved data, props and the render handle
    /// - `Err(RendererError::Generator)` - A data or props generator failed
    /// - `Err(RendererError::PropsNotObject)` - Props overrides given for props that are
    ///   not a JSON object
    /// - `Err(RendererError::PropsNotRoundTrip)` - Props overrides given for props that
    ///   JSON cannot carry in full
    /// - `Err(RendererError::Serde)` - A value failed to convert to or from JSON
    pub async fn render(
        &self,
        overrides: RenderOverrides<P>,
    ) -> Result<Rendered<P, H>, RendererError> {
        let config = &self.config;
        let RenderOverrides {
            data: data_override,
            props: props_override,
        } = overrides;

        let data = config.resolve_data(data_override)?;
        let initial_props = match &config.props {
            Some(definition) => definition.run_if_fn(&data)?,
            None => default_props()?,
        };
        let (props, props_record) = config.override_props(initial_props, props_override, &data)?;

        config
            .events
            .trigger(RendererEvent::BeforeRender, &data, &props)
            .await;

        let options = RenderOptions {
            data: data.clone(),
            wrapper: config.wrapper,
        };
        tracing::debug!(fields = data.len(), "Rendering component");
        let render_utils = (config.render_function)(
            Ui {
                component: config.component,
                props: props.clone(),
            },
            &options,
        );

        config
            .events
            .trigger(RendererEvent::Render, &data, &props)
            .await;

        Ok(Rendered {
            data,
            props,
            props_record,
            render_utils,
            options,
            config: self.config.clone(),
        })
    }
}

impl<P, H> RendererConfig<P, H>
where
    P: Clone + PartialEq + Serialize + DeserializeOwned + 'static,
{
    fn resolve_data(&self, data_override: Option<DataOverride>) -> Result<Data, RendererError> {
        let overrides = match data_override {
            Some(data_override) => data_override.run_if_fn(&self.data)?,
            None => Data::new(),
        };
        let merged = override_predefined_keys(self.data.entries(), overrides, MaybeFn::Value);

        resolve_in_order(merged)
    }

    fn override_props(
        &self,
        initial_props: P,
        props_override: Option<PropsOverride<P>>,
        data: &Data,
    ) -> Result<(P, Data), RendererError> {
        let initial_record = props_record(&initial_props)?;
        let Some(props_override) = props_override else {
            return Ok((initial_props, initial_record.unwrap_or_default()));
        };

        let context = PropsOverrideContext {
            initial_data: self.data.clone(),
            initial_props,
            next_data: data.clone(),
        };
        let overrides = props_override.run_if_fn(&context)?;
        let initial_props = context.initial_props;

        if overrides.is_empty() {
            return Ok((initial_props, initial_record.unwrap_or_default()));
        }
        let Some(initial_record) = initial_record else {
            return Err(RendererError::PropsNotObject);
        };
        let merged: Data = override_predefined_keys(
            initial_record.clone().into_iter().collect(),
            overrides,
            |value| value,
        )
        .into_iter()
        .collect();

        if merged == initial_record {
            return Ok((initial_props, initial_record));
        }

        let round_trip: P = serde_json::from_value(Value::Object(initial_record.clone()))?;
        if round_trip != initial_props {
            return Err(RendererError::PropsNotRoundTrip);
        }

        let props = serde_json::from_value(Value::Object(merged.clone()))?;

        Ok((props, merged))
    }
}

/// Props as a JSON object, `None` when they serialize to something else.
///
/// Unit props serialize to `null` and count as an object without keys.
fn props_record<P: Serialize>(props: &P) -> Result<Option<Data>, RendererError> {
    Ok(match serde_json::to_value(props)? {
        Value::Object(record) => Some(record),
        Value::Null => Some(Data::new()),
        _ => None,
    })
}

/// Props used when no props definition was set: from an empty object, else from `null`.
fn default_props<P: DeserializeOwned>() -> Result<P, RendererError> {
    serde_json::from_value(Value::Object(Data::new()))
        .or_else(|_| serde_json::from_value(Value::Null))
        .map_err(RendererError::from)
}

/// Result of a render invocation.
///
/// Holds the resolved data and props, the render handle and the means to remount the
/// component with the same props.
pub struct Rendered<P, H> {
    data: Data,
    props: P,
    props_record: Data,
    render_utils: H,
    options: RenderOptions,
    config: Rc<RendererConfig<P, H>>,
}

impl<P, H> Rendered<P, H>
where
    P: Clone + 'static,
    H: RenderHandle,
{
    /// Resolved data.
    pub fn data(&self) -> &Data {
        &self.data
    }

    /// Resolved props.
    pub fn props(&self) -> &P {
        &self.props
    }

    /// Reads a resolved value by name, looking at props first and then data.
    pub fn field<T: DeserializeOwned>(&self, name: &str) -> Result<T, RendererError> {
        match self.props_record.get(name) {
            Some(value) => Ok(serde_json::from_value(value.clone())?),
            None => self.data.field(name),
        }
    }

    /// Handle returned by the latest render.
    pub fn render_utils(&self) -> &H {
        &self.render_utils
    }

    pub fn render_utils_mut(&mut self) -> &mut H {
        &mut self.render_utils
    }

    pub fn into_render_utils(self) -> H {
        self.render_utils
    }

    /// Unmounts the current render and renders again with the same props.
    ///
    /// Data and props generators are not run again. Emits `remount` with the data and
    /// props of the original invocation and waits for it.
    ///
    /// # Returns
    /// - `&H` - Handle of the new render
    pub async fn remount(&mut self) -> &H {
        self.render_utils.unmount();
        self.render_utils = (self.config.render_function)(
            Ui {
                component: self.config.component,
                props: self.props.clone(),
            },
            &self.options,
        );

        self.config
            .events
            .trigger(RendererEvent::Remount, &self.data, &self.props)
            .await;

        &self.render_utils
    }
}
