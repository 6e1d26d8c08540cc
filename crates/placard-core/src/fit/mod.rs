pub mod area;
pub mod metrics;
pub mod statements;
pub mod wrap;

pub use area::{fit_statements_to_area, line_height};
pub use metrics::{CoreFontMetrics, Font, TextMeasure};
pub use statements::{process_precautionary_statements, strip_statement_code};
pub use wrap::{fit_text_to_width, truncate_text, wrap_text};
