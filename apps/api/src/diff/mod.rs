// Word-level diff engine for original vs rewritten text.
// CPU-bound alignment must run inside tokio::task::spawn_blocking.

pub mod handlers;
pub mod word_diff;
