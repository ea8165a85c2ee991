//! Backend for the Windows sharing configuration component (`HNetCfg.HNetShare`).

#[cfg(target_os = "windows")]
mod com_guard;
#[cfg(target_os = "windows")]
mod elevation;
#[cfg(target_os = "windows")]
mod ics_backend;

#[cfg(target_os = "windows")]
pub use ics_backend::IcsBackend;

#[cfg(not(target_os = "windows"))]
mod unsupported;

#[cfg(not(target_os = "windows"))]
pub use unsupported::IcsBackend;
