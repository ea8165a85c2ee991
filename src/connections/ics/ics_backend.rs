use log::{debug, info};
use std::collections::HashMap;
use windows::{
    core::{IUnknown, Interface, VARIANT},
    Win32::{
        NetworkManagement::WindowsFirewall::{
            INetConnection, INetSharingConfiguration, INetSharingManager, NetSharingManager,
            ICSSHARINGTYPE_PRIVATE, ICSSHARINGTYPE_PUBLIC, NCM_BRIDGE, NCM_DIRECT, NCM_ISDN,
            NCM_LAN, NCM_PHONE, NCM_PPPOE, NCM_SHAREDACCESSHOST_LAN, NCM_SHAREDACCESSHOST_RAS,
            NCM_TUNNEL, NCS_AUTHENTICATION_SUCCEEDED, NCS_CONNECTED, NCS_DISCONNECTED,
            NCS_HARDWARE_DISABLED, NCS_HARDWARE_NOT_PRESENT, NETCON_MEDIATYPE, NETCON_STATUS,
            SHARINGCONNECTIONTYPE,
        },
        System::{
            Com::{CoCreateInstance, CLSCTX_ALL},
            Ole::IEnumVARIANT,
        },
    },
};

use super::com_guard::ComGuard;
use super::elevation;
use crate::connections::backend::SharingBackend;
use crate::connections::errors::SharingError;
use crate::connections::net_connection::{
    MediaType, NetConnection, OperationalStatus, SharingRole, SharingState,
};

/// `SharingBackend` over the `INetSharingManager` COM object.
///
/// Must be created and used on a single thread.
pub struct IcsBackend {
    manager: INetSharingManager,
    /// COM handles from the latest enumeration, keyed by connection GUID.
    handles: HashMap<String, INetConnection>,
    // Declared last: fields drop in order and COM must outlive every interface above.
    _com: ComGuard,
}

fn com_failure(operation: &'static str) -> impl FnOnce(windows::core::Error) -> SharingError {
    move |e| SharingError::service_failure(operation, e.to_string())
}

impl IcsBackend {
    /// Initialize COM, create the sharing manager and make sure sharing is installed.
    pub fn new() -> Result<Self, SharingError> {
        let com = ComGuard::new()?;
        // SAFETY: COM is initialized on this thread by `com`.
        let manager: INetSharingManager =
            unsafe { CoCreateInstance(&NetSharingManager, None, CLSCTX_ALL) }
                .map_err(com_failure("CoCreateInstance(HNetCfg.HNetShare)"))?;

        // SAFETY: `manager` is a live interface pointer.
        let installed = unsafe { manager.SharingInstalled() }
            .map_err(com_failure("SharingInstalled"))?;
        if !installed.as_bool() {
            return Err(SharingError::service_failure(
                "SharingInstalled",
                "Internet Connection Sharing is not installed on this system",
            ));
        }
        debug!("Sharing manager created");

        Ok(Self {
            manager,
            handles: HashMap::new(),
            _com: com,
        })
    }

    fn handle_for(&self, connection: &NetConnection) -> Result<&INetConnection, SharingError> {
        self.handles
            .get(&connection.guid)
            .ok_or_else(|| SharingError::ConnectionNotFound(connection.name.clone()))
    }

    fn configuration_for(
        &self,
        connection: &NetConnection,
    ) -> Result<INetSharingConfiguration, SharingError> {
        let handle = self.handle_for(connection)?;
        // SAFETY: `handle` came from this manager's own enumeration.
        unsafe {
            self.manager
                .get_INetSharingConfigurationForINetConnection(handle)
        }
        .map_err(com_failure("get_INetSharingConfigurationForINetConnection"))
        .map_err(|e| e.on_connection(&connection.name))
    }

    fn describe(&self, handle: &INetConnection) -> Result<NetConnection, SharingError> {
        // SAFETY: `handle` is a live interface pointer returned by the enumerator.
        let props = unsafe { self.manager.get_NetConnectionProps(handle) }
            .map_err(com_failure("get_NetConnectionProps"))?;
        // SAFETY: `props` is a live interface pointer.
        unsafe {
            Ok(NetConnection {
                name: props.Name().map_err(com_failure("INetConnectionProps::Name"))?.to_string(),
                guid: props.Guid().map_err(com_failure("INetConnectionProps::Guid"))?.to_string(),
                device_name: props
                    .DeviceName()
                    .map_err(com_failure("INetConnectionProps::DeviceName"))?
                    .to_string(),
                media_type: media_type(
                    props
                        .MediaType()
                        .map_err(com_failure("INetConnectionProps::MediaType"))?,
                ),
                status: operational_status(
                    props.Status().map_err(com_failure("INetConnectionProps::Status"))?,
                ),
            })
        }
    }
}

impl SharingBackend for IcsBackend {
    fn is_elevated(&self) -> Result<bool, SharingError> {
        elevation::is_elevated()
    }

    fn enumerate_connections(&mut self) -> Result<Vec<NetConnection>, SharingError> {
        // SAFETY: `self.manager` is live for the lifetime of the backend.
        let collection = unsafe { self.manager.EnumEveryConnection() }
            .map_err(com_failure("EnumEveryConnection"))?;
        // SAFETY: `collection` is a live interface pointer.
        let unknown = unsafe { collection._NewEnum() }.map_err(com_failure("_NewEnum"))?;
        let enumerator: IEnumVARIANT = unknown.cast().map_err(com_failure("IEnumVARIANT"))?;

        self.handles.clear();
        let mut connections = Vec::new();
        loop {
            let mut item = [VARIANT::default()];
            let mut fetched = 0u32;
            // SAFETY: `item` has room for exactly the one element we ask for.
            unsafe { enumerator.Next(&mut item, &mut fetched) }
                .ok()
                .map_err(com_failure("IEnumVARIANT::Next"))?;
            if fetched == 0 {
                break;
            }

            let handle: INetConnection = IUnknown::try_from(&item[0])
                .and_then(|unknown| unknown.cast())
                .map_err(com_failure("INetConnection"))?;
            let connection = self.describe(&handle)?;
            debug!(
                "Found connection '{}' ({}, {})",
                connection.name, connection.media_type, connection.status
            );
            self.handles.insert(connection.guid.clone(), handle);
            connections.push(connection);
        }
        Ok(connections)
    }

    fn sharing_state(&mut self, connection: &NetConnection) -> Result<SharingState, SharingError> {
        let configuration = self.configuration_for(connection)?;
        // SAFETY: `configuration` is a live interface pointer.
        let enabled = unsafe { configuration.SharingEnabled() }
            .map_err(com_failure("SharingEnabled"))
            .map_err(|e| e.on_connection(&connection.name))?;
        if !enabled.as_bool() {
            return Ok(SharingState::Disabled);
        }
        // SAFETY: as above.
        let kind = unsafe { configuration.SharingConnectionType() }
            .map_err(com_failure("SharingConnectionType"))
            .map_err(|e| e.on_connection(&connection.name))?;
        Ok(if kind == ICSSHARINGTYPE_PUBLIC {
            SharingState::EnabledAsPublic
        } else {
            SharingState::EnabledAsPrivate
        })
    }

    fn enable_sharing(
        &mut self,
        connection: &NetConnection,
        role: SharingRole,
    ) -> Result<(), SharingError> {
        let configuration = self.configuration_for(connection)?;
        info!("Enabling sharing on '{}' as {}", connection.name, role);
        // SAFETY: `configuration` is a live interface pointer.
        unsafe { configuration.EnableSharing(sharing_type(role)) }
            .map_err(com_failure("EnableSharing"))
            .map_err(|e| e.on_connection(&connection.name))
    }

    fn disable_sharing(&mut self, connection: &NetConnection) -> Result<(), SharingError> {
        let configuration = self.configuration_for(connection)?;
        info!("Disabling sharing on '{}'", connection.name);
        // SAFETY: `configuration` is a live interface pointer.
        unsafe { configuration.DisableSharing() }
            .map_err(com_failure("DisableSharing"))
            .map_err(|e| e.on_connection(&connection.name))
    }
}

fn sharing_type(role: SharingRole) -> SHARINGCONNECTIONTYPE {
    match role {
        SharingRole::Public => ICSSHARINGTYPE_PUBLIC,
        SharingRole::Private => ICSSHARINGTYPE_PRIVATE,
    }
}

fn operational_status(status: NETCON_STATUS) -> OperationalStatus {
    match status {
        NCS_CONNECTED | NCS_AUTHENTICATION_SUCCEEDED => OperationalStatus::Up,
        NCS_HARDWARE_NOT_PRESENT => OperationalStatus::Absent,
        // A disconnected LAN connection is one the user switched off.
        NCS_HARDWARE_DISABLED | NCS_DISCONNECTED => OperationalStatus::Disabled,
        _ => OperationalStatus::Down,
    }
}

fn media_type(media: NETCON_MEDIATYPE) -> MediaType {
    match media {
        NCM_LAN => MediaType::Lan,
        NCM_BRIDGE => MediaType::Bridge,
        NCM_TUNNEL => MediaType::Tunnel,
        NCM_PPPOE => MediaType::Pppoe,
        NCM_PHONE => MediaType::Phone,
        NCM_ISDN => MediaType::Isdn,
        NCM_DIRECT => MediaType::Direct,
        NCM_SHAREDACCESSHOST_LAN | NCM_SHAREDACCESSHOST_RAS => MediaType::SharedAccessHost,
        _ => MediaType::None,
    }
}
