//! CSS analysis: cascade indexing, variable resolution, expression
//! evaluation, media matching, and color math.

pub mod color;
pub mod eval;
pub mod index;
pub mod media;
pub mod resolver;

pub use index::{CssIndex, Declaration, VarDefinition};
pub use resolver::{ROOT_SCOPE, ResolvedValue, ResolvedVar, Resolver};
