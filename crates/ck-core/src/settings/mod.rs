//! User-facing configuration model.

mod defaults;
mod model;

pub use model::{Settings, CURRENT_SCHEMA_VERSION};
