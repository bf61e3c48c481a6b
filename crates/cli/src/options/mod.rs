mod dist_format_options;
mod format_options;

pub use dist_format_options::DistFormatOptions;
pub use format_options::FormatOptions;
