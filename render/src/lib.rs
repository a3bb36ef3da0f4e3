//! Initializer Render
//!
//! Fluent renderer builder for Dioxus component tests. Test data is declared as named
//! generators resolved in declaration order, props are derived from the resolved data,
//! and each test can override both before the component is rendered.
//!
//! # Overview
//!
//! - **Renderer**: builder collecting data, props, component, render function and events
//! - **BoundRenderer**: sealed renderer, invoked with optional `RenderOverrides`
//! - **Rendered**: resolved data and props, the render handle and `remount()`
//! - **ssr::render**: stock render function producing HTML via `dioxus-ssr`
//!
//! # Usage
//!
//! ```rust,ignore
//! use initializer_render::{create_renderer, ssr, RenderOverrides};
//!
//! #[tokio::test]
//! async fn shows_login_email() -> Result<(), RendererError> {
//!     let render_login = create_renderer::<LoginProps>()
//!         .add_data("login", |_| json!({ "email": "test@test.com" }))
//!         .try_set_props(|data| Ok::<_, RendererError>(LoginProps { login: data.field("login")? }))
//!         .set_component(LoginCard)
//!         .set_render_function(ssr::render)
//!         .build()?;
//!
//!     let rendered = render_login
//!         .render(RenderOverrides::new().with_data("login", json!({ "email": "x@y.com" })))
//!         .await?;
//!
//!     assert!(rendered.render_utils().contains_text("x@y.com"));
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod data;
pub mod error;
pub mod event;
pub mod overrides;
pub mod renderer;
pub mod ssr;
pub mod ui;
pub mod util;

#[cfg(test)]
mod test;

pub use builder::{create_renderer, Renderer};
pub use data::{Data, DataDefinitions, DataExt};
pub use error::{ConfigError, RendererError};
pub use event::{EventContext, RendererEvent};
pub use overrides::{PropsOverrideContext, RenderOverrides};
pub use renderer::{BoundRenderer, Rendered};
pub use ssr::SsrHandle;
pub use ui::{Component, RenderHandle, RenderOptions, Ui, Wrapper};
