//! Parameter domain types: values and their kind tags, declared defaults, sources.

pub mod params;
pub mod source;
pub mod value;

pub use params::*;
pub use source::*;
pub use value::*;
