pub mod connections;
pub mod core;
pub mod storage;
pub mod ui;
pub mod utils;

// re-export ergonomic entry points
pub use crate::core::sharing_manager::{Approval, SharingManager};
pub use connections::{SharingBackend, SharingError};
