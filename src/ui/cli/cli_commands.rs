use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand, ValueEnum};
use crossterm::style::Stylize;
use log::{debug, info};
use std::io::{self, BufRead, IsTerminal, Write};

use super::output::Renderer;
use crate::connections::backend::SharingBackend;
use crate::connections::errors::SharingError;
use crate::connections::ics::IcsBackend;
use crate::core::sharing_manager::{Approval, SharingAction, SharingManager};
use crate::core::status_query::{SortOrder, StatusFilter, StatusQuery};
use crate::storage::{ProfileStore, Settings, SettingsStore, SharingProfile};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "ics-rs",
    version,
    about = "Control Windows Internet Connection Sharing",
    subcommand_required = true
)]
pub struct Args {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Share the public connection's internet access with the private connection
    SetSharing(SetSharingArgs),
    /// Show the sharing status of connections
    GetStatus(GetStatusArgs),
    /// Disable sharing on every connection
    DisableSharing(ApplyFlags),
    /// Manage saved public/private pairs
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Show or change default settings
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(ClapArgs, Debug)]
pub struct SetSharingArgs {
    /// Name of the upstream connection (wildcards `*` and `?` allowed)
    #[arg(long, required_unless_present = "profile", requires = "private")]
    pub public: Option<String>,
    /// Name of the downstream connection (wildcards `*` and `?` allowed)
    #[arg(long, required_unless_present = "profile", requires = "public")]
    pub private: Option<String>,
    /// Use a saved profile instead of --public/--private
    #[arg(long, conflicts_with_all = ["public", "private"])]
    pub profile: Option<String>,
    #[command(flatten)]
    pub apply: ApplyFlags,
}

#[derive(ClapArgs, Debug)]
pub struct ApplyFlags {
    /// Print the resulting state of the affected connections
    #[arg(long)]
    pub pass_through: bool,
    /// Show what would change without changing anything
    #[arg(long, conflicts_with = "confirm")]
    pub dry_run: bool,
    /// Ask before each change
    #[arg(long)]
    pub confirm: bool,
}

#[derive(ClapArgs, Debug)]
pub struct GetStatusArgs {
    /// Connection names or wildcard patterns to report
    #[arg(long, num_args = 1..)]
    pub names: Vec<String>,
    /// Report every connection
    #[arg(long, conflicts_with = "enabled_only")]
    pub all: bool,
    /// Report only connections with sharing enabled
    #[arg(long)]
    pub enabled_only: bool,
    /// Row order (defaults to the configured order)
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// List saved profiles
    List,
    /// Save (or overwrite) a profile
    Save {
        #[arg(long)]
        name: String,
        #[arg(long)]
        public: String,
        #[arg(long)]
        private: String,
    },
    /// Delete a profile
    Delete {
        #[arg(long)]
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the current settings
    Show,
    /// Change one or more settings
    Set {
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
        /// Fail get-status on names that match nothing
        #[arg(long)]
        strict: Option<bool>,
        /// Make get-status report only enabled connections by default
        #[arg(long)]
        enabled_only: Option<bool>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortArg {
    /// By connection name
    Name,
    /// By sharing state, then connection type
    State,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => SortOrder::Name,
            SortArg::State => SortOrder::StateThenType,
        }
    }
}

impl GetStatusArgs {
    /// Combine the flags with the stored defaults.
    pub fn query(&self, settings: &Settings) -> StatusQuery {
        let filter = if self.enabled_only {
            StatusFilter::EnabledOnly
        } else if self.all {
            StatusFilter::All
        } else {
            settings.status_filter
        };
        StatusQuery {
            names: self.names.clone(),
            filter,
            sort: self.sort.map(SortOrder::from).unwrap_or(settings.sort),
            strict: settings.strict_names,
        }
    }
}

pub fn run_cli(args: Args) -> Result<(), SharingError> {
    let renderer = Renderer {
        json: args.json,
        color: !args.json && io::stdout().is_terminal(),
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::SetSharing(set) => {
            let (public, private) = sharing_pair(&set)?;
            set_sharing_command(&mut open_manager()?, &public, &private, &set.apply, &renderer, &mut out)
        }
        Command::GetStatus(status) => {
            let query = status.query(&SettingsStore::new()?.load()?);
            get_status_command(&mut open_manager()?, &query, &renderer, &mut out)
        }
        Command::DisableSharing(apply) => {
            disable_sharing_command(&mut open_manager()?, &apply, &renderer, &mut out)
        }
        Command::Profile(command) => run_profile_command(command, &renderer, &mut out),
        Command::Config(command) => run_config_command(command, &renderer, &mut out),
    }
}

fn open_manager() -> Result<SharingManager<IcsBackend>, SharingError> {
    Ok(SharingManager::new(IcsBackend::new()?))
}

/// The public/private names, either given directly or from a saved profile.
fn sharing_pair(args: &SetSharingArgs) -> Result<(String, String), SharingError> {
    if let Some(name) = &args.profile {
        let profile = ProfileStore::new()?
            .get(name)?
            .ok_or_else(|| SharingError::ProfileNotFound(name.clone()))?;
        debug!("Using profile '{}'", profile.name);
        return Ok((profile.public, profile.private));
    }
    match (&args.public, &args.private) {
        (Some(public), Some(private)) => Ok((public.clone(), private.clone())),
        _ => Err(SharingError::Other(
            "Both --public and --private are required".into(),
        )),
    }
}

pub fn set_sharing_command<B: SharingBackend>(
    manager: &mut SharingManager<B>,
    public: &str,
    private: &str,
    flags: &ApplyFlags,
    renderer: &Renderer,
    out: &mut dyn Write,
) -> Result<(), SharingError> {
    info!("Sharing '{}' (public) with '{}' (private)", public, private);
    let mut confirm = prompt_confirm;
    let outcome = manager.set_sharing(public, private, approval(flags, &mut confirm))?;
    renderer.set_sharing(out, &outcome, flags.pass_through)?;
    Ok(())
}

pub fn get_status_command<B: SharingBackend>(
    manager: &mut SharingManager<B>,
    query: &StatusQuery,
    renderer: &Renderer,
    out: &mut dyn Write,
) -> Result<(), SharingError> {
    let statuses = manager.get_status(query)?;
    renderer.statuses(out, &statuses)?;
    Ok(())
}

pub fn disable_sharing_command<B: SharingBackend>(
    manager: &mut SharingManager<B>,
    flags: &ApplyFlags,
    renderer: &Renderer,
    out: &mut dyn Write,
) -> Result<(), SharingError> {
    let mut confirm = prompt_confirm;
    let outcome = manager.disable_all(approval(flags, &mut confirm))?;
    renderer.disable_sharing(out, &outcome, flags.dry_run, flags.pass_through)?;
    Ok(())
}

fn approval<'a>(
    flags: &ApplyFlags,
    confirm: &'a mut dyn FnMut(&SharingAction) -> bool,
) -> Approval<'a> {
    if flags.dry_run {
        Approval::DryRun
    } else if flags.confirm {
        Approval::Confirm(confirm)
    } else {
        Approval::Automatic
    }
}

/// Ask on stderr, read the answer from stdin. Anything but yes declines.
fn prompt_confirm(action: &SharingAction) -> bool {
    let mut stderr = io::stderr();
    let _ = write!(stderr, "{} {}? [y/N] ", "?".yellow().bold(), action);
    let _ = stderr.flush();

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn run_profile_command(
    command: ProfileCommand,
    renderer: &Renderer,
    out: &mut dyn Write,
) -> Result<(), SharingError> {
    let store = ProfileStore::new()?;
    match command {
        ProfileCommand::List => renderer.profiles(out, &store.list()?)?,
        ProfileCommand::Save {
            name,
            public,
            private,
        } => {
            if public.to_lowercase() == private.to_lowercase() {
                return Err(SharingError::SameConnection(public));
            }
            store.save(&SharingProfile {
                name: name.clone(),
                public,
                private,
            })?;
            writeln!(out, "Saved profile '{}'.", name)?;
        }
        ProfileCommand::Delete { name } => {
            if !store.delete(&name)? {
                return Err(SharingError::ProfileNotFound(name));
            }
            writeln!(out, "Deleted profile '{}'.", name)?;
        }
    }
    Ok(())
}

fn run_config_command(
    command: ConfigCommand,
    renderer: &Renderer,
    out: &mut dyn Write,
) -> Result<(), SharingError> {
    let store = SettingsStore::new()?;
    let mut settings = store.load()?;
    match command {
        ConfigCommand::Show => {}
        ConfigCommand::Set {
            sort,
            strict,
            enabled_only,
        } => {
            if let Some(sort) = sort {
                settings.sort = sort.into();
            }
            if let Some(strict) = strict {
                settings.strict_names = strict;
            }
            if let Some(enabled_only) = enabled_only {
                settings.status_filter = if enabled_only {
                    StatusFilter::EnabledOnly
                } else {
                    StatusFilter::All
                };
            }
            store.save(&settings)?;
            info!("Saved settings to {:?}", store.path());
        }
    }
    renderer.settings(out, &settings)?;
    Ok(())
}
