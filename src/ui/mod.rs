//! User interface module - status output for the command line.
//!
//! - `formatter` - Pure formatting functions and the printers built on them

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_status, display_success, display_summary, format_error,
    format_status, format_success, format_summary,
};
