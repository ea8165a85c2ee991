use super::errors::SharingError;
use super::net_connection::{NetConnection, SharingRole, SharingState};

/// A trait representing the OS sharing configuration component.
///
/// Implementations never cache: every `enumerate_connections` call reads the
/// live state. The Windows implementation lives in `connections::ics`; tests
/// use an in-memory fake.
pub trait SharingBackend {
    /// Whether the calling process holds the privilege needed to change sharing.
    fn is_elevated(&self) -> Result<bool, SharingError>;

    fn enumerate_connections(&mut self) -> Result<Vec<NetConnection>, SharingError>;
    fn sharing_state(&mut self, connection: &NetConnection) -> Result<SharingState, SharingError>;

    fn enable_sharing(
        &mut self,
        connection: &NetConnection,
        role: SharingRole,
    ) -> Result<(), SharingError>;
    fn disable_sharing(&mut self, connection: &NetConnection) -> Result<(), SharingError>;
}

impl<B: SharingBackend + ?Sized> SharingBackend for Box<B> {
    fn is_elevated(&self) -> Result<bool, SharingError> {
        (**self).is_elevated()
    }

    fn enumerate_connections(&mut self) -> Result<Vec<NetConnection>, SharingError> {
        (**self).enumerate_connections()
    }

    fn sharing_state(&mut self, connection: &NetConnection) -> Result<SharingState, SharingError> {
        (**self).sharing_state(connection)
    }

    fn enable_sharing(
        &mut self,
        connection: &NetConnection,
        role: SharingRole,
    ) -> Result<(), SharingError> {
        (**self).enable_sharing(connection, role)
    }

    fn disable_sharing(&mut self, connection: &NetConnection) -> Result<(), SharingError> {
        (**self).disable_sharing(connection)
    }
}
