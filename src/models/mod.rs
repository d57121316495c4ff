//! Zanata API model types.

mod iteration;
mod json;
mod project;
mod status;
mod suggestion;

pub use iteration::*;
pub use project::*;
pub use status::*;
pub use suggestion::*;
