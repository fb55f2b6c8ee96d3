//! Application Layer

pub mod generate;
pub mod prompt;

pub use generate::{ReportGenerator, RetryPolicy, parse_analysis, strip_code_fence};
pub use prompt::build_prompt;
