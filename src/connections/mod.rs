pub mod backend;
pub mod errors;
pub mod ics;
pub mod net_connection;

// Re-export the modules here for easy import elsewhere.
pub use backend::*;
pub use errors::*;
pub use net_connection::*;
