mod defaults;
mod env;
mod error;
mod file_config;
mod loader;
mod resolve;
pub mod schema;
mod source;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod validation;

pub use defaults::*;
pub use env::*;
pub use error::*;
pub use file_config::*;
pub use loader::*;
pub use resolve::*;
pub use schema::{Field, FieldKind, SlotId, SlotKeys};
pub use source::*;
