//! Small helpers shared by the resolution pipeline.

pub mod function;
pub mod object;

pub use function::MaybeFn;
pub use object::{override_predefined_keys, resolve_in_order};
