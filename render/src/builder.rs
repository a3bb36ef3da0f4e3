use std::{future::Future, rc::Rc};

use dioxus_logger::tracing;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    data::{Data, DataDefinitions},
    error::{ConfigError, RendererError},
    event::{EventContext, Events, RendererEvent},
    renderer::{BoundRenderer, PropsDefinition, RendererConfig},
    ssr::SsrHandle,
    ui::{Component, RenderFunction, RenderHandle, RenderOptions, Ui, Wrapper},
    util::MaybeFn,
};

/// Creates a renderer builder for components taking props `P`.
///
/// Shorthand for `Renderer::new()`.
pub fn create_renderer<P>() -> Renderer<P>
where
    P: Clone + PartialEq + Serialize + DeserializeOwned + 'static,
{
    Renderer::new()
}

/// Builder for rendering a component under test with derived data and props.
///
/// Accumulates named data generators, a props derivation, the component, the render
/// function and lifecycle callbacks. `build()` consumes the builder and seals the
/// configuration into a `BoundRenderer`, so nothing can be reconfigured afterwards.
///
/// # Example
///
/// ```rust,ignore
/// let render_login = create_renderer::<LoginProps>()
///     .add_data("login", |_| Login { email: "test@test.com".into() })
///     .set_props(|data| LoginProps { login: data.field("login").unwrap() })
///     .set_component(LoginCard)
///     .set_render_function(ssr::render)
///     .build()?;
///
/// let rendered = render_login.render_default().await?;
/// ```
pub struct Renderer<P, H = SsrHandle> {
    data: DataDefinitions,
    props: Option<PropsDefinition<P>>,
    component: Option<Component<P>>,
    render_function: Option<RenderFunction<P, H>>,
    wrapper: Option<Wrapper>,
    events: Events<P>,
}

impl<P> Renderer<P>
where
    P: Clone + PartialEq + Serialize + DeserializeOwned + 'static,
{
    /// Creates a builder with no data, props, component or render function.
    pub fn new() -> Self {
        Self {
            data: DataDefinitions::default(),
            props: None,
            component: None,
            render_function: None,
            wrapper: None,
            events: Events::default(),
        }
    }
}

impl<P> Default for Renderer<P>
where
    P: Clone + PartialEq + Serialize + DeserializeOwned + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P, H> Renderer<P, H>
where
    P: Clone + PartialEq + Serialize + DeserializeOwned + 'static,
    H: RenderHandle + 'static,
{
    /// Declares a data field derived from the fields declared before it.
    ///
    /// The generator runs once per invocation unless the field is overridden, and
    /// receives the data resolved so far in declaration order.
    ///
    /// # Arguments
    /// - `name` - Data field name
    /// - `generate` - Closure producing the field value from earlier fields
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn add_data<T, F>(mut self, name: impl Into<String>, generate: F) -> Self
    where
        T: Serialize,
        F: Fn(&Data) -> T + 'static,
    {
        self.data.insert(
            name.into(),
            MaybeFn::Fn(Rc::new(move |data: &Data| {
                Ok(serde_json::to_value(generate(data))?)
            })),
        );
        self
    }

    /// Declares a data field whose generator may fail.
    ///
    /// An error fails the invocation with `RendererError::Generator`.
    pub fn try_add_data<T, E, F>(mut self, name: impl Into<String>, generate: F) -> Self
    where
        T: Serialize,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
        F: Fn(&Data) -> Result<T, E> + 'static,
    {
        let name = name.into();
        let field = name.clone();
        self.data.insert(
            name,
            MaybeFn::Fn(Rc::new(move |data: &Data| {
                let value = generate(data).map_err(|source| RendererError::Generator {
                    name: field.clone(),
                    source: source.into(),
                })?;

                Ok(serde_json::to_value(value)?)
            })),
        );
        self
    }

    /// Declares a data field with a fixed value.
    pub fn add_data_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(name.into(), MaybeFn::Value(value.into()));
        self
    }

    /// Sets the props derivation from the fully resolved data.
    pub fn set_props<F>(mut self, derive: F) -> Self
    where
        F: Fn(&Data) -> P + 'static,
    {
        self.props = Some(MaybeFn::from_fn(derive));
        self
    }

    /// Sets a props derivation that may fail.
    pub fn try_set_props<E, F>(mut self, derive: F) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
        F: Fn(&Data) -> Result<P, E> + 'static,
    {
        self.props = Some(MaybeFn::Fn(Rc::new(move |data: &Data| {
            derive(data).map_err(|source| RendererError::Generator {
                name: "props".to_string(),
                source: source.into(),
            })
        })));
        self
    }

    /// Sets fixed props.
    pub fn set_props_value(mut self, props: P) -> Self {
        self.props = Some(MaybeFn::Value(props));
        self
    }

    /// Sets the component under test.
    pub fn set_component(mut self, component: Component<P>) -> Self {
        self.component = Some(component);
        self
    }

    /// Sets the render function, which also fixes the render handle type.
    ///
    /// # Arguments
    /// - `render` - Function rendering a `Ui` and returning a handle, e.g. `ssr::render`
    ///
    /// # Returns
    /// - `Renderer<P, R>` - Builder producing handles of the new type
    pub fn set_render_function<R, F>(self, render: F) -> Renderer<P, R>
    where
        R: RenderHandle + 'static,
        F: Fn(Ui<P>, &RenderOptions) -> R + 'static,
    {
        Renderer {
            data: self.data,
            props: self.props,
            component: self.component,
            render_function: Some(Rc::new(render)),
            wrapper: self.wrapper,
            events: self.events,
        }
    }

    /// Sets a wrapper passed to the render function in `RenderOptions`.
    pub fn set_wrapper(mut self, wrapper: Wrapper) -> Self {
        self.wrapper = Some(wrapper);
        self
    }

    /// Registers the callback for a lifecycle event, replacing any previous one.
    ///
    /// The callback receives the resolved data and props and is awaited before the
    /// invocation continues.
    pub fn on<F, Fut>(mut self, event: RendererEvent, callback: F) -> Self
    where
        F: Fn(EventContext<P>) -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        self.events.set(event, callback);
        self
    }

    /// Seals the configuration.
    ///
    /// # Returns
    /// - `Ok(BoundRenderer)` - Invocable renderer
    /// - `Err(RendererError::Config(ConfigError::MissingComponent))` - No component set
    /// - `Err(RendererError::Config(ConfigError::MissingRenderFunction))` - No render
    ///   function set
    pub fn build(self) -> Result<BoundRenderer<P, H>, RendererError> {
        let component = self.component.ok_or(ConfigError::MissingComponent)?;
        let render_function = self
            .render_function
            .ok_or(ConfigError::MissingRenderFunction)?;

        tracing::debug!(data_fields = self.data.len(), "Built renderer");

        Ok(BoundRenderer::new(RendererConfig {
            data: self.data,
            props: self.props,
            component,
            render_function,
            wrapper: self.wrapper,
            events: self.events,
        }))
    }
}
