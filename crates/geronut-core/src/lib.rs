//! geronut-core
//!
//! Pure domain types for the geriatric nutrition assessment: closed
//! vocabularies, record sections, form parsing and file-name conventions.
//! Nothing here touches the filesystem.

pub mod error;
pub mod file_names;
pub mod form;
pub mod models;
pub mod vocab;

pub use error::CoreError;
pub use form::{FormValues, FromForm, ValidationError, ValidationKind};
pub use models::record::PatientRecord;
