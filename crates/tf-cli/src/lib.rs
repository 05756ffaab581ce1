//! Library side of the `therapist-finder` binary: logging setup, result
//! rendering and the interactive session.

pub mod logging;
pub mod session;
pub mod summary;

pub use session::{DEFAULT_DOWNLOAD, Session, SessionReply, set_criterion};
