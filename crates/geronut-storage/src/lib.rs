//! geronut-storage
//!
//! Local JSON persistence. One snapshot file per patient, a separate
//! area of follow-up entries, and the [`Session`] that saves after every
//! section edit.

pub mod error;
pub mod evolution;
pub mod fs;
pub mod session;
pub mod snapshot;
pub mod store;

pub use error::{SessionError, StorageError};
pub use evolution::EvolutionEntry;
pub use session::Session;
pub use snapshot::LoadedSnapshot;
pub use store::PatientStore;
