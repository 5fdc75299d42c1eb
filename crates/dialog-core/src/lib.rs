//! Dialog Core - Shared functionality for consult-user-dialog
//!
//! Standard paths, the immutable application identity, the YAML
//! configuration file and the ordered subprocess invocation policy used by
//! the notification and speech handlers.

pub mod app;
pub mod config;
pub mod error;
pub mod paths;
pub mod process;

pub use app::AppInfo;
pub use config::Config;
pub use error::{DialogError, Result};
pub use paths::Paths;
