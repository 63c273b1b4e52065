pub mod formatter;

pub use formatter::{
    format_age, format_history, format_ranked_guesses, format_result, format_score,
    format_system_detail, format_system_table, should_use_colors,
};
