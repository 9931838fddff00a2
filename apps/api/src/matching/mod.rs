// Requirement matching engine.
// Implements: token normalization, line splitting, overlap matching, classification,
// section aggregation, and per-job analysis. Pure functions; no I/O below `handlers`.

pub mod aggregate;
pub mod analysis;
pub mod classifier;
pub mod handlers;
pub mod normalize;
pub mod overlap;
pub mod splitter;
