//! Testing Initializer
//!
//! Test-authoring helpers for Dioxus components. Two independent building blocks are
//! re-exported here:
//! - **data**: in-memory relational fixture database with generated primary keys and
//!   resolved relations
//! - **render**: renderer builder resolving named test data into component props,
//!   rendering the component, and allowing per-test overrides of data and props
//!
//! # Usage
//!
//! ```rust,ignore
//! use testing_initializer::prelude::*;
//!
//! let db = create_database(
//!     DatabaseDefinition::new().model("user", ModelDefinition::new().field("name", || "User")),
//! )?;
//!
//! let render_profile = create_renderer::<ProfileProps>()
//!     .add_data("user", move |_| db.model("user").and_then(|users| users.create_default()).ok())
//!     .try_set_props(|data| Ok::<_, RendererError>(ProfileProps { user: data.field("user")? }))
//!     .set_component(Profile)
//!     .set_render_function(ssr::render)
//!     .build()?;
//! ```

pub use initializer_data as data;
pub use initializer_render as render;

pub mod prelude {
    pub use initializer_data::{
        create_database, create_database_with, generate_id, next_id, Collection, DataError,
        Database, DatabaseDefinition, IdGenerator, ModelDefinition, Record,
    };
    pub use initializer_render::{
        create_renderer, ssr, BoundRenderer, ConfigError, Data, DataExt, EventContext,
        RenderHandle, RenderOptions, RenderOverrides, Rendered, Renderer, RendererError,
        RendererEvent, SsrHandle, Ui,
    };
}
