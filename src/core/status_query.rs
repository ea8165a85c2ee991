use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::connections::net_connection::{ConnectionStatus, SharingState};

/// How `get-status` orders its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    Name,
    /// Enabled connections first (public, then private), then by media type.
    StateThenType,
}

/// Which connections `get-status` reports when no names are given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    #[default]
    All,
    EnabledOnly,
}

/// Parameters of one `get-status` call.
#[derive(Debug, Clone, Default)]
pub struct StatusQuery {
    /// Exact names or wildcard patterns. Empty means every connection.
    pub names: Vec<String>,
    pub filter: StatusFilter,
    pub sort: SortOrder,
    /// Fail on the first name that matches nothing instead of skipping it.
    pub strict: bool,
}

fn state_rank(state: SharingState) -> u8 {
    match state {
        SharingState::EnabledAsPublic => 0,
        SharingState::EnabledAsPrivate => 1,
        SharingState::Disabled => 2,
    }
}

fn by_name(a: &ConnectionStatus, b: &ConnectionStatus) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}

pub fn sort_statuses(statuses: &mut [ConnectionStatus], order: SortOrder) {
    match order {
        SortOrder::Name => statuses.sort_by(by_name),
        SortOrder::StateThenType => statuses.sort_by(|a, b| {
            state_rank(a.state())
                .cmp(&state_rank(b.state()))
                .then_with(|| a.media_type.cmp(&b.media_type))
                .then_with(|| by_name(a, b))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connections::net_connection::{MediaType, OperationalStatus, SharingRole};

    fn status(name: &str, role: Option<SharingRole>, media_type: MediaType) -> ConnectionStatus {
        ConnectionStatus {
            name: name.to_string(),
            enabled: role.is_some(),
            role,
            status: OperationalStatus::Up,
            media_type,
        }
    }

    fn names(statuses: &[ConnectionStatus]) -> Vec<&str> {
        statuses.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn name_order_is_case_insensitive() {
        let mut statuses = vec![
            status("wi-fi", None, MediaType::Lan),
            status("Ethernet", None, MediaType::Lan),
            status("bluetooth", None, MediaType::Lan),
        ];
        sort_statuses(&mut statuses, SortOrder::Name);
        assert_eq!(names(&statuses), ["bluetooth", "Ethernet", "wi-fi"]);
    }

    #[test]
    fn state_order_puts_public_then_private_first() {
        let mut statuses = vec![
            status("A tunnel", None, MediaType::Tunnel),
            status("B lan", None, MediaType::Lan),
            status("Z private", Some(SharingRole::Private), MediaType::Lan),
            status("Y public", Some(SharingRole::Public), MediaType::Lan),
        ];
        sort_statuses(&mut statuses, SortOrder::StateThenType);
        assert_eq!(
            names(&statuses),
            ["Y public", "Z private", "B lan", "A tunnel"]
        );
    }
}
