// Shared support modules

mod tracing;

pub use self::tracing::{
    TracingLevel, get_current_tracing_level, get_trace_log_path, init_file_tracing,
};
