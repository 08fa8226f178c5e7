//! Data model shared by the engine, the HTTP layer and the CLI.

mod provider;
mod result;
mod target;

pub use provider::*;
pub use result::*;
pub use target::*;
