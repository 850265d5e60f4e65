//! geronut-export
//!
//! Report text generation from Tera templates. Page layout is left to
//! whatever consumes the rendered text.

pub mod error;
pub mod render;

pub use error::ExportError;
pub use render::{render_report, render_template, ReportContext, DEFAULT_TEMPLATE};
