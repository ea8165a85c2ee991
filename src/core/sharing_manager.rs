use log::{debug, info, warn};
use std::fmt::{self, Display};

use super::pattern::NamePattern;
use super::status_query::{sort_statuses, StatusFilter, StatusQuery};
use crate::connections::backend::SharingBackend;
use crate::connections::errors::SharingError;
use crate::connections::net_connection::{
    ConnectionStatus, NetConnection, SharedConnection, SharingRole, SharingState,
};

/// One mutation the manager intends to issue against the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SharingAction {
    Disable { name: String, state: SharingState },
    Enable { name: String, role: SharingRole },
}

impl SharingAction {
    pub fn name(&self) -> &str {
        match self {
            SharingAction::Disable { name, .. } => name,
            SharingAction::Enable { name, .. } => name,
        }
    }
}

impl Display for SharingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SharingAction::Disable { name, state } => {
                write!(f, "Disable sharing on '{}' (currently {})", name, state)
            }
            SharingAction::Enable { name, role } => {
                write!(f, "Enable sharing on '{}' as {}", name, role)
            }
        }
    }
}

/// Decides whether planned actions actually run.
pub enum Approval<'a> {
    /// Run every action.
    Automatic,
    /// Only report the plan.
    DryRun,
    /// Ask before every action.
    Confirm(&'a mut dyn FnMut(&SharingAction) -> bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetSharingOutcome {
    /// The pair was already shared; nothing was touched.
    AlreadySet {
        public: ConnectionStatus,
        private: ConnectionStatus,
    },
    Applied {
        actions: Vec<SharingAction>,
        public: ConnectionStatus,
        private: ConnectionStatus,
    },
    DryRun {
        actions: Vec<SharingAction>,
    },
    /// The user declined `declined`; `executed` had already run.
    Declined {
        executed: Vec<SharingAction>,
        declined: SharingAction,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisableOutcome {
    /// Every action in the plan, executed or not.
    pub actions: Vec<SharingAction>,
    /// Names of the connections whose sharing was actually disabled.
    pub changed: Vec<String>,
    /// Names the user declined to change.
    pub skipped: Vec<String>,
    /// Live status of the changed connections after the run.
    pub after: Vec<ConnectionStatus>,
}

struct PlannedStep {
    connection: NetConnection,
    action: SharingAction,
}

impl PlannedStep {
    fn disable(shared: &SharedConnection) -> Self {
        PlannedStep {
            connection: shared.connection.clone(),
            action: SharingAction::Disable {
                name: shared.connection.name.clone(),
                state: shared.state,
            },
        }
    }

    fn enable(shared: &SharedConnection, role: SharingRole) -> Self {
        PlannedStep {
            connection: shared.connection.clone(),
            action: SharingAction::Enable {
                name: shared.connection.name.clone(),
                role,
            },
        }
    }
}

/// Find the single connection `name` refers to.
///
/// Exact names are compared case-insensitively; if several connections differ
/// only by case, the one matching case-sensitively wins.
pub fn resolve<'a>(
    set: &'a [SharedConnection],
    name: &str,
) -> Result<&'a SharedConnection, SharingError> {
    let pattern = NamePattern::parse(name)?;
    let matches = matching(set, &pattern);
    match matches.as_slice() {
        [] => Err(SharingError::ConnectionNotFound(name.to_string())),
        [single] => Ok(*single),
        many => {
            if !pattern.is_wildcard() {
                if let Some(exact) = many.iter().find(|c| c.name() == name) {
                    return Ok(*exact);
                }
            }
            Err(SharingError::AmbiguousConnectionName {
                pattern: name.to_string(),
                matches: many.iter().map(|c| c.name().to_string()).collect(),
            })
        }
    }
}

fn matching<'a>(set: &'a [SharedConnection], pattern: &NamePattern) -> Vec<&'a SharedConnection> {
    set.iter().filter(|c| pattern.matches(c.name())).collect()
}

/// True when the pair is already shared the requested way round.
pub fn check_enabled(public: &SharedConnection, private: &SharedConnection) -> bool {
    public.state == SharingState::EnabledAsPublic
        && private.state == SharingState::EnabledAsPrivate
}

/// Drives the connection-pair resolver and the idempotent switch over a backend.
///
/// Nothing is cached: every operation re-reads the live connection set.
pub struct SharingManager<B: SharingBackend> {
    backend: B,
}

impl<B: SharingBackend> SharingManager<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    fn require_elevation(&self) -> Result<(), SharingError> {
        if self.backend.is_elevated()? {
            Ok(())
        } else {
            Err(SharingError::PrivilegeRequired)
        }
    }

    /// Enumerate every connection together with its sharing state.
    pub fn connection_set(&mut self) -> Result<Vec<SharedConnection>, SharingError> {
        let connections = self.backend.enumerate_connections()?;
        let mut set = Vec::with_capacity(connections.len());
        for connection in connections {
            let state = self.backend.sharing_state(&connection)?;
            set.push(SharedConnection { connection, state });
        }
        debug!("Enumerated {} connections", set.len());
        Ok(set)
    }

    /// Share `public_name`'s internet access with `private_name`.
    pub fn set_sharing(
        &mut self,
        public_name: &str,
        private_name: &str,
        approval: Approval<'_>,
    ) -> Result<SetSharingOutcome, SharingError> {
        if public_name.to_lowercase() == private_name.to_lowercase() {
            return Err(SharingError::SameConnection(public_name.to_string()));
        }
        self.require_elevation()?;

        let set = self.connection_set()?;
        let public = resolve(&set, public_name)?;
        let private = resolve(&set, private_name)?;
        if public.connection.guid == private.connection.guid {
            return Err(SharingError::SameConnection(public.name().to_string()));
        }
        if !private.connection.status.is_up() {
            return Err(SharingError::ConnectionNotEnabled {
                name: private.name().to_string(),
                status: private.connection.status,
            });
        }

        if check_enabled(public, private) {
            info!(
                "Sharing from '{}' to '{}' is already set",
                public.name(),
                private.name()
            );
            return Ok(SetSharingOutcome::AlreadySet {
                public: public.status(),
                private: private.status(),
            });
        }

        let mut plan: Vec<PlannedStep> = set
            .iter()
            .filter(|c| c.state.is_enabled())
            .map(PlannedStep::disable)
            .collect();
        plan.push(PlannedStep::enable(public, SharingRole::Public));
        plan.push(PlannedStep::enable(private, SharingRole::Private));
        let public_guid = public.connection.guid.clone();
        let private_guid = private.connection.guid.clone();

        let actions: Vec<SharingAction> = plan.iter().map(|s| s.action.clone()).collect();
        let mut confirm = match approval {
            Approval::DryRun => return Ok(SetSharingOutcome::DryRun { actions }),
            Approval::Automatic => None,
            Approval::Confirm(confirm) => Some(confirm),
        };

        let mut executed = Vec::with_capacity(plan.len());
        for step in plan {
            if let Some(confirm) = confirm.as_mut() {
                if !confirm(&step.action) {
                    warn!("Declined: {}; stopping", step.action);
                    return Ok(SetSharingOutcome::Declined {
                        executed,
                        declined: step.action,
                    });
                }
            }
            self.execute(&step)?;
            executed.push(step.action);
        }

        let after = self.connection_set()?;
        let status_of = |guid: &str, name: &str| {
            after
                .iter()
                .find(|c| c.connection.guid == guid)
                .map(SharedConnection::status)
                .ok_or_else(|| SharingError::ConnectionNotFound(name.to_string()))
        };
        Ok(SetSharingOutcome::Applied {
            actions: executed,
            public: status_of(&public_guid, public_name)?,
            private: status_of(&private_guid, private_name)?,
        })
    }

    /// Report the sharing status of the requested (or all) connections.
    pub fn get_status(&mut self, query: &StatusQuery) -> Result<Vec<ConnectionStatus>, SharingError> {
        self.require_elevation()?;
        let set = self.connection_set()?;

        let mut statuses: Vec<ConnectionStatus> = if query.names.is_empty() {
            set.iter()
                .filter(|c| match query.filter {
                    StatusFilter::All => true,
                    StatusFilter::EnabledOnly => c.state.is_enabled(),
                })
                .map(SharedConnection::status)
                .collect()
        } else {
            let mut selected: Vec<&SharedConnection> = Vec::new();
            for name in &query.names {
                let pattern = NamePattern::parse(name)?;
                let found = matching(&set, &pattern);
                if found.is_empty() {
                    if query.strict {
                        return Err(SharingError::ConnectionNotFound(name.clone()));
                    }
                    warn!("No network connection named '{}' was found", name);
                    continue;
                }
                for connection in found {
                    if !selected
                        .iter()
                        .any(|c| c.connection.guid == connection.connection.guid)
                    {
                        selected.push(connection);
                    }
                }
            }
            selected.into_iter().map(SharedConnection::status).collect()
        };

        sort_statuses(&mut statuses, query.sort);
        Ok(statuses)
    }

    /// Disable sharing on every connection that has it enabled.
    pub fn disable_all(&mut self, approval: Approval<'_>) -> Result<DisableOutcome, SharingError> {
        self.require_elevation()?;
        let set = self.connection_set()?;
        let plan: Vec<PlannedStep> = set
            .iter()
            .filter(|c| c.state.is_enabled())
            .map(PlannedStep::disable)
            .collect();

        let mut outcome = DisableOutcome {
            actions: plan.iter().map(|s| s.action.clone()).collect(),
            ..Default::default()
        };
        if plan.is_empty() {
            info!("Sharing is not enabled on any connection");
            return Ok(outcome);
        }

        let mut confirm = match approval {
            Approval::DryRun => return Ok(outcome),
            Approval::Automatic => None,
            Approval::Confirm(confirm) => Some(confirm),
        };

        let mut changed_guids = Vec::new();
        for step in plan {
            if let Some(confirm) = confirm.as_mut() {
                if !confirm(&step.action) {
                    info!("Skipping '{}'", step.connection.name);
                    outcome.skipped.push(step.connection.name.clone());
                    continue;
                }
            }
            self.execute(&step)?;
            outcome.changed.push(step.connection.name.clone());
            changed_guids.push(step.connection.guid);
        }

        if !changed_guids.is_empty() {
            outcome.after = self
                .connection_set()?
                .iter()
                .filter(|c| changed_guids.contains(&c.connection.guid))
                .map(SharedConnection::status)
                .collect();
        }
        Ok(outcome)
    }

    fn execute(&mut self, step: &PlannedStep) -> Result<(), SharingError> {
        debug!("{}", step.action);
        match &step.action {
            SharingAction::Disable { .. } => self.backend.disable_sharing(&step.connection),
            SharingAction::Enable { role, .. } => {
                self.backend.enable_sharing(&step.connection, *role)
            }
        }
    }
}
