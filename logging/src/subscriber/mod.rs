// Wiring between `tracing` and the formatter/filter pipeline.

mod layer;
mod visitor;

pub use layer::PatternLayer;
