//! Initializer Data
//!
//! In-memory relational fixture database for component tests. Models are declared as
//! ordered field dictionaries of generators and relation markers; every model gets a
//! primary key, either a user-declared `id` generator or a synthesized `__pk` counter.
//!
//! # Overview
//!
//! - **IdGenerator**: per-key monotonically increasing counters used for primary keys
//! - **ModelDefinition / DatabaseDefinition**: declarative schema for the fixture models
//! - **Database / Collection**: the created fixture database and its per-model `create`
//!
//! # Usage
//!
//! ```rust,ignore
//! use initializer_data::{create_database, DatabaseDefinition, ModelDefinition};
//! use serde_json::json;
//!
//! let db = create_database(
//!     DatabaseDefinition::new()
//!         .model("user", ModelDefinition::new().field("name", || "User"))
//!         .model(
//!             "project",
//!             ModelDefinition::new()
//!                 .field("name", || "Project")
//!                 .one_of("owner", "user"),
//!         ),
//! )?;
//!
//! let user = db.model("user")?.create_default()?;
//! let project = db.model("project")?.create(json!({ "owner": user }))?;
//! ```

pub mod collection;
pub mod error;
pub mod factory;
pub mod id;
pub mod model;

#[cfg(test)]
mod test;

pub use collection::Collection;
pub use error::DataError;
pub use factory::{create_database, create_database_with, Database};
pub use id::{generate_id, next_id, IdGenerator};
pub use model::{DatabaseDefinition, FieldDefinition, ModelDefinition, Record};

/// Name of the primary-key field synthesized for models without an `id` generator.
pub const PRIMARY_KEY_FIELD: &str = "__pk";

/// Name of the user-declared field promoted to primary key when it holds a generator.
pub const ID_FIELD: &str = "id";
