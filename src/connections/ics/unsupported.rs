use crate::connections::backend::SharingBackend;
use crate::connections::errors::SharingError;
use crate::connections::net_connection::{NetConnection, SharingRole, SharingState};

/// Placeholder so the CLI builds off Windows. Opening it always fails.
pub struct IcsBackend {
    _private: (),
}

impl IcsBackend {
    pub fn new() -> Result<Self, SharingError> {
        Err(SharingError::Unsupported)
    }
}

impl SharingBackend for IcsBackend {
    fn is_elevated(&self) -> Result<bool, SharingError> {
        Err(SharingError::Unsupported)
    }

    fn enumerate_connections(&mut self) -> Result<Vec<NetConnection>, SharingError> {
        Err(SharingError::Unsupported)
    }

    fn sharing_state(&mut self, _connection: &NetConnection) -> Result<SharingState, SharingError> {
        Err(SharingError::Unsupported)
    }

    fn enable_sharing(
        &mut self,
        _connection: &NetConnection,
        _role: SharingRole,
    ) -> Result<(), SharingError> {
        Err(SharingError::Unsupported)
    }

    fn disable_sharing(&mut self, _connection: &NetConnection) -> Result<(), SharingError> {
        Err(SharingError::Unsupported)
    }
}
