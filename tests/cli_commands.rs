use ics_rs::connections::{OperationalStatus, SharingState};
use ics_rs::core::status_query::StatusQuery;
use ics_rs::ui::cli::cli_commands::{
    disable_sharing_command, get_status_command, set_sharing_command, ApplyFlags,
};
use ics_rs::ui::cli::output::Renderer;
use ics_rs::SharingManager;

mod common;
use common::fake_backend::FakeBackend;

fn flags(pass_through: bool, dry_run: bool) -> ApplyFlags {
    ApplyFlags {
        pass_through,
        dry_run,
        confirm: false,
    }
}

const TEXT: Renderer = Renderer {
    json: false,
    color: false,
};

fn laptop() -> FakeBackend {
    FakeBackend::new()
        .with_connection("Wi-Fi", OperationalStatus::Up)
        .with_connection("Ethernet", OperationalStatus::Up)
}

#[test]
fn set_sharing_pass_through_prints_both_sides() -> anyhow::Result<()> {
    let mut manager = SharingManager::new(laptop());
    let mut out = Vec::<u8>::new();

    set_sharing_command(&mut manager, "Wi-Fi", "Ethernet", &flags(true, false), &TEXT, &mut out)?;

    let text = String::from_utf8(out)?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Enable sharing on 'Wi-Fi' as public");
    assert_eq!(lines[1], "Enable sharing on 'Ethernet' as private");
    assert_eq!(
        lines[2],
        "Sharing enabled from 'Wi-Fi' (public) to 'Ethernet' (private)."
    );
    assert!(lines[3].starts_with("NAME"));
    assert!(lines[4].starts_with("Wi-Fi     public "));
    assert!(lines[5].starts_with("Ethernet  private"));
    Ok(())
}

#[test]
fn set_sharing_twice_reports_already_set() -> anyhow::Result<()> {
    let mut manager = SharingManager::new(laptop());
    set_sharing_command(&mut manager, "Wi-Fi", "Ethernet", &flags(false, false), &TEXT, &mut Vec::<u8>::new())?;

    let mut out = Vec::<u8>::new();
    set_sharing_command(&mut manager, "Wi-Fi", "Ethernet", &flags(false, false), &TEXT, &mut out)?;
    assert_eq!(
        String::from_utf8(out)?,
        "Sharing from 'Wi-Fi' to 'Ethernet' is already set.\n"
    );
    assert_eq!(manager.backend().mutations.len(), 2);
    Ok(())
}

#[test]
fn disable_sharing_json_lists_changed_connections() -> anyhow::Result<()> {
    let backend = laptop()
        .shared_as("Wi-Fi", SharingState::EnabledAsPublic)
        .shared_as("Ethernet", SharingState::EnabledAsPrivate);
    let mut manager = SharingManager::new(backend);
    let json = Renderer {
        json: true,
        color: false,
    };

    let mut out = Vec::<u8>::new();
    disable_sharing_command(&mut manager, &flags(false, false), &json, &mut out)?;

    let value: serde_json::Value = serde_json::from_slice(&out)?;
    assert_eq!(value["result"], "applied");
    assert_eq!(value["changed"], serde_json::json!(["Wi-Fi", "Ethernet"]));
    assert_eq!(value["after"][0]["enabled"], false);
    Ok(())
}

#[test]
fn disable_sharing_dry_run_prints_what_if() -> anyhow::Result<()> {
    let backend = laptop().shared_as("Ethernet", SharingState::EnabledAsPrivate);
    let mut manager = SharingManager::new(backend);

    let mut out = Vec::<u8>::new();
    disable_sharing_command(&mut manager, &flags(false, true), &TEXT, &mut out)?;
    assert_eq!(
        String::from_utf8(out)?,
        "What if: Disable sharing on 'Ethernet' (currently enabled (private))\n"
    );
    assert!(manager.backend().mutations.is_empty());
    Ok(())
}

#[test]
fn get_status_errors_propagate_to_the_caller() {
    let mut manager = SharingManager::new(laptop());
    let query = StatusQuery {
        names: vec!["Cellular".into()],
        strict: true,
        ..Default::default()
    };

    let err = get_status_command(&mut manager, &query, &TEXT, &mut Vec::<u8>::new()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "No network connection named 'Cellular' was found"
    );
}
