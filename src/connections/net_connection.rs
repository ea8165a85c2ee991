use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Which side of a sharing pair a connection is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SharingRole {
    /// The upstream connection that owns internet access.
    Public,
    /// The downstream connection that receives shared access.
    Private,
}

impl Display for SharingRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SharingRole::Public => write!(f, "public"),
            SharingRole::Private => write!(f, "private"),
        }
    }
}

/// Sharing configuration of a single connection, as reported by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SharingState {
    Disabled,
    EnabledAsPublic,
    EnabledAsPrivate,
}

impl SharingState {
    pub fn enabled(role: SharingRole) -> Self {
        match role {
            SharingRole::Public => SharingState::EnabledAsPublic,
            SharingRole::Private => SharingState::EnabledAsPrivate,
        }
    }

    pub fn role(&self) -> Option<SharingRole> {
        match self {
            SharingState::Disabled => None,
            SharingState::EnabledAsPublic => Some(SharingRole::Public),
            SharingState::EnabledAsPrivate => Some(SharingRole::Private),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, SharingState::Disabled)
    }
}

impl Display for SharingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SharingState::Disabled => write!(f, "disabled"),
            SharingState::EnabledAsPublic => write!(f, "enabled (public)"),
            SharingState::EnabledAsPrivate => write!(f, "enabled (private)"),
        }
    }
}

/// Operational status of the interface behind a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationalStatus {
    /// The hardware is not present.
    Absent,
    /// The hardware or the connection is disabled.
    Disabled,
    /// Present and enabled, but not connected.
    Down,
    Up,
}

impl OperationalStatus {
    pub fn is_up(&self) -> bool {
        matches!(self, OperationalStatus::Up)
    }
}

impl Display for OperationalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationalStatus::Absent => write!(f, "absent"),
            OperationalStatus::Disabled => write!(f, "disabled"),
            OperationalStatus::Down => write!(f, "down"),
            OperationalStatus::Up => write!(f, "up"),
        }
    }
}

/// Kind of medium a connection runs over.
///
/// The variant order is the order used when sorting by type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaType {
    Lan,
    Bridge,
    Tunnel,
    Pppoe,
    Phone,
    Isdn,
    Direct,
    SharedAccessHost,
    None,
}

impl Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MediaType::Lan => "lan",
            MediaType::Bridge => "bridge",
            MediaType::Tunnel => "tunnel",
            MediaType::Pppoe => "pppoe",
            MediaType::Phone => "phone",
            MediaType::Isdn => "isdn",
            MediaType::Direct => "direct",
            MediaType::SharedAccessHost => "shared-access-host",
            MediaType::None => "none",
        };
        f.write_str(text)
    }
}

/// One network connection visible to the OS sharing component.
///
/// `guid` is the stable identity the backend uses to find the connection
/// again; `name` is what users type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetConnection {
    pub name: String,
    pub guid: String,
    pub device_name: String,
    pub media_type: MediaType,
    pub status: OperationalStatus,
}

/// A connection paired with its current sharing state.
///
/// A `Vec<SharedConnection>` read in one pass is the live connection set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedConnection {
    pub connection: NetConnection,
    pub state: SharingState,
}

impl SharedConnection {
    pub fn name(&self) -> &str {
        &self.connection.name
    }

    pub fn status(&self) -> ConnectionStatus {
        ConnectionStatus {
            name: self.connection.name.clone(),
            enabled: self.state.is_enabled(),
            role: self.state.role(),
            status: self.connection.status,
            media_type: self.connection.media_type,
        }
    }
}

/// What the status commands report for one connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub name: String,
    pub enabled: bool,
    pub role: Option<SharingRole>,
    pub status: OperationalStatus,
    pub media_type: MediaType,
}

impl ConnectionStatus {
    pub fn state(&self) -> SharingState {
        match self.role {
            Some(role) if self.enabled => SharingState::enabled(role),
            _ => SharingState::Disabled,
        }
    }
}
