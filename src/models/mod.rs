//! The fixed model catalog: evaluation and formula rendering.
//!
//! Models are implemented as small, pure functions over `ModelKind` so that
//! fitting code can stay generic. The catalog is closed; there is no runtime
//! registration.

pub mod formula;
pub mod model;

pub use formula::*;
pub use model::*;
