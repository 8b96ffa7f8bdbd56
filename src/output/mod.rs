pub mod formatter;
pub mod report;

pub use formatter::{
    format_derived_fields, format_points, format_rules_table, format_summary, should_use_colors,
};
pub use report::{load_report, save_report, to_json, Report};
