use ics_rs::connections::{MediaType, OperationalStatus, SharingError, SharingRole, SharingState};
use ics_rs::core::sharing_manager::SharingManager;
use ics_rs::core::status_query::{SortOrder, StatusFilter, StatusQuery};

mod common;
use common::fake_backend::FakeBackend;
use common::init_test_logging;

fn office() -> FakeBackend {
    FakeBackend::new()
        .with_typed_connection("Wi-Fi", OperationalStatus::Up, MediaType::Lan)
        .with_typed_connection("Ethernet", OperationalStatus::Up, MediaType::Lan)
        .with_typed_connection("Ethernet 2", OperationalStatus::Down, MediaType::Lan)
        .with_typed_connection("Corp VPN", OperationalStatus::Up, MediaType::Tunnel)
        .with_typed_connection("Dial-up", OperationalStatus::Absent, MediaType::Phone)
        .shared_as("Wi-Fi", SharingState::EnabledAsPrivate)
        .shared_as("Corp VPN", SharingState::EnabledAsPublic)
}

fn query(names: &[&str]) -> StatusQuery {
    StatusQuery {
        names: names.iter().map(|n| n.to_string()).collect(),
        strict: true,
        ..Default::default()
    }
}

fn names(statuses: &[ics_rs::connections::ConnectionStatus]) -> Vec<&str> {
    statuses.iter().map(|s| s.name.as_str()).collect()
}

#[test]
fn reports_every_connection_sorted_by_name() {
    init_test_logging();
    let mut manager = SharingManager::new(office());

    let statuses = manager.get_status(&query(&[])).expect("get_status should succeed");
    assert_eq!(
        names(&statuses),
        ["Corp VPN", "Dial-up", "Ethernet", "Ethernet 2", "Wi-Fi"]
    );

    let vpn = &statuses[0];
    assert!(vpn.enabled);
    assert_eq!(vpn.role, Some(SharingRole::Public));
    assert_eq!(vpn.media_type, MediaType::Tunnel);
    let dial_up = &statuses[1];
    assert!(!dial_up.enabled);
    assert_eq!(dial_up.role, None);
    assert_eq!(dial_up.status, OperationalStatus::Absent);
    assert!(manager.backend().mutations.is_empty());
}

#[test]
fn enabled_only_hides_idle_connections() {
    let mut manager = SharingManager::new(office());

    let statuses = manager
        .get_status(&StatusQuery {
            filter: StatusFilter::EnabledOnly,
            sort: SortOrder::StateThenType,
            ..query(&[])
        })
        .expect("get_status should succeed");
    assert_eq!(names(&statuses), ["Corp VPN", "Wi-Fi"]);
}

#[test]
fn state_then_type_order() {
    let mut manager = SharingManager::new(office());

    let statuses = manager
        .get_status(&StatusQuery {
            sort: SortOrder::StateThenType,
            ..query(&[])
        })
        .expect("get_status should succeed");
    assert_eq!(
        names(&statuses),
        ["Corp VPN", "Wi-Fi", "Ethernet", "Ethernet 2", "Dial-up"]
    );
}

#[test]
fn named_lookup_reports_each_match_once() {
    let mut manager = SharingManager::new(office());

    let statuses = manager
        .get_status(&query(&["Ethernet*", "ethernet 2", "wi-fi"]))
        .expect("get_status should succeed");
    assert_eq!(names(&statuses), ["Ethernet", "Ethernet 2", "Wi-Fi"]);
}

#[test]
fn unknown_name_fails_in_strict_mode() {
    let mut manager = SharingManager::new(office());

    let err = manager
        .get_status(&query(&["Wi-Fi", "Cellular"]))
        .unwrap_err();
    assert!(matches!(err, SharingError::ConnectionNotFound(ref name) if name == "Cellular"));
    assert!(manager.backend().mutations.is_empty());
}

#[test]
fn unknown_name_is_skipped_in_lenient_mode() {
    let mut manager = SharingManager::new(office());

    let statuses = manager
        .get_status(&StatusQuery {
            strict: false,
            ..query(&["Cellular", "Wi-Fi"])
        })
        .expect("lenient get_status should succeed");
    assert_eq!(names(&statuses), ["Wi-Fi"]);
}

#[test]
fn reads_live_state_every_time() {
    let mut manager = SharingManager::new(office());
    manager.get_status(&query(&[])).unwrap();
    manager.get_status(&query(&[])).unwrap();
    assert_eq!(manager.backend().enumerations, 2);
}

#[test]
fn requires_elevation() {
    let mut manager = SharingManager::new(office().not_elevated());
    let err = manager.get_status(&query(&[])).unwrap_err();
    assert!(matches!(err, SharingError::PrivilegeRequired));
    assert_eq!(manager.backend().enumerations, 0);
}
