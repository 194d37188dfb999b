//! Session recorder adapters.
//!
//! - `TracingSessionRecorder` - Writes answers and outcomes to the log
//! - `InMemorySessionRecorder` - Captures calls for assertions in tests

mod in_memory;
mod tracing_recorder;

pub use in_memory::{InMemorySessionRecorder, RecordedAnswer, RecordedResult};
pub use tracing_recorder::TracingSessionRecorder;
