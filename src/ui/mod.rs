//! Presentation helpers shared by every front end

pub mod format;

pub use format::{
    FormatError, dirt_label, elapsed_label, format_compact, parse_timestamp,
    progress_bar, relative_time_label, relative_time_label_at,
};
