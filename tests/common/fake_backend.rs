//! A deterministic **in-process stand-in** for the Windows sharing manager.
//!
//! *  **From the test's perspective**
//!    * Describe the machine with `FakeBackend::new().with_connection(...)`.
//!    * Inspect every mutation the manager issued via `fake.mutations`.
//!    * Read the resulting state with `fake.state_of(name)`.
//!
//! *  **Rules it enforces like the OS does**: only one public and one
//!    private connection at a time, and only present connections can be
//!    shared. Enabling a role that another connection holds fails, so a
//!    manager that forgets to tear down the old pair is caught.

use ics_rs::connections::{
    MediaType, NetConnection, OperationalStatus, SharingBackend, SharingError, SharingRole,
    SharingState,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Enable { name: String, role: SharingRole },
    Disable { name: String },
}

pub struct FakeBackend {
    pub elevated: bool,
    connections: Vec<(NetConnection, SharingState)>,

    /// Every enable/disable call, in order, kept for assertions.
    pub mutations: Vec<Mutation>,
    pub enumerations: usize,
    /// Mutation calls against this connection fail like a COM error.
    pub fail_mutations_on: Option<String>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            elevated: true,
            connections: Vec::new(),
            mutations: Vec::new(),
            enumerations: 0,
            fail_mutations_on: None,
        }
    }

    pub fn with_connection(self, name: &str, status: OperationalStatus) -> Self {
        self.with_typed_connection(name, status, MediaType::Lan)
    }

    pub fn with_typed_connection(
        mut self,
        name: &str,
        status: OperationalStatus,
        media_type: MediaType,
    ) -> Self {
        let guid = format!("{{{}}}", uuid::Uuid::new_v4()).to_uppercase();
        self.connections.push((
            NetConnection {
                name: name.to_string(),
                guid,
                device_name: format!("{name} adapter"),
                media_type,
                status,
            },
            SharingState::Disabled,
        ));
        self
    }

    /// Pretend sharing was already configured before the test.
    pub fn shared_as(mut self, name: &str, state: SharingState) -> Self {
        self.entry_mut(name).1 = state;
        self
    }

    pub fn not_elevated(mut self) -> Self {
        self.elevated = false;
        self
    }

    pub fn state_of(&self, name: &str) -> SharingState {
        self.connections
            .iter()
            .find(|(c, _)| c.name == name)
            .map(|(_, state)| *state)
            .unwrap_or_else(|| panic!("fake has no connection named {name}"))
    }

    pub fn enabled_count(&self, state: SharingState) -> usize {
        self.connections.iter().filter(|(_, s)| *s == state).count()
    }

    fn entry_mut(&mut self, name: &str) -> &mut (NetConnection, SharingState) {
        self.connections
            .iter_mut()
            .find(|(c, _)| c.name == name)
            .unwrap_or_else(|| panic!("fake has no connection named {name}"))
    }

    fn check_mutation(&self, connection: &NetConnection, operation: &str) -> Result<(), SharingError> {
        if self.fail_mutations_on.as_deref() == Some(connection.name.as_str()) {
            return Err(SharingError::service_failure(
                operation,
                "The RPC server is unavailable. (0x800706BA)",
            )
            .on_connection(&connection.name));
        }
        if !self.connections.iter().any(|(c, _)| c.guid == connection.guid) {
            return Err(SharingError::ConnectionNotFound(connection.name.clone()));
        }
        Ok(())
    }
}

impl SharingBackend for FakeBackend {
    fn is_elevated(&self) -> Result<bool, SharingError> {
        Ok(self.elevated)
    }

    fn enumerate_connections(&mut self) -> Result<Vec<NetConnection>, SharingError> {
        self.enumerations += 1;
        Ok(self.connections.iter().map(|(c, _)| c.clone()).collect())
    }

    fn sharing_state(&mut self, connection: &NetConnection) -> Result<SharingState, SharingError> {
        self.connections
            .iter()
            .find(|(c, _)| c.guid == connection.guid)
            .map(|(_, state)| *state)
            .ok_or_else(|| SharingError::ConnectionNotFound(connection.name.clone()))
    }

    fn enable_sharing(
        &mut self,
        connection: &NetConnection,
        role: SharingRole,
    ) -> Result<(), SharingError> {
        self.check_mutation(connection, "EnableSharing")?;
        self.mutations.push(Mutation::Enable {
            name: connection.name.clone(),
            role,
        });

        let wanted = SharingState::enabled(role);
        if let Some((holder, _)) = self
            .connections
            .iter()
            .find(|(c, state)| *state == wanted && c.guid != connection.guid)
        {
            return Err(SharingError::service_failure(
                "EnableSharing",
                format!("'{}' is already shared as {}", holder.name, role),
            )
            .on_connection(&connection.name));
        }
        self.entry_mut(&connection.name).1 = wanted;
        Ok(())
    }

    fn disable_sharing(&mut self, connection: &NetConnection) -> Result<(), SharingError> {
        self.check_mutation(connection, "DisableSharing")?;
        self.mutations.push(Mutation::Disable {
            name: connection.name.clone(),
        });
        self.entry_mut(&connection.name).1 = SharingState::Disabled;
        Ok(())
    }
}
