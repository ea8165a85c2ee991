pub mod pattern;
pub mod sharing_manager;
pub mod status_query;

// Re-export the modules here for easy import elsewhere.
pub use pattern::*;
pub use sharing_manager::*;
pub use status_query::*;
