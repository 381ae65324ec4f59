pub mod diagnostics;
pub mod digest;
pub mod emit;
pub mod encoding;
pub mod names;
pub mod pipeline;
pub mod reconcile;
