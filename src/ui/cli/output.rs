use crossterm::style::Stylize;
use serde_json::json;
use std::io::{self, Write};

use crate::connections::net_connection::{ConnectionStatus, SharingRole};
use crate::core::sharing_manager::{DisableOutcome, SetSharingOutcome, SharingAction};
use crate::storage::{Settings, SharingProfile};

/// Writes command results either as a human-readable table or as JSON.
pub struct Renderer {
    pub json: bool,
    pub color: bool,
}

impl Renderer {
    fn role_cell(&self, status: &ConnectionStatus, width: usize) -> String {
        let text = match (status.enabled, status.role) {
            (true, Some(role)) => role.to_string(),
            _ => "-".to_string(),
        };
        let padded = format!("{:<width$}", text);
        if !self.color {
            return padded;
        }
        match (status.enabled, status.role) {
            (true, Some(SharingRole::Public)) => padded.green().bold().to_string(),
            (true, Some(SharingRole::Private)) => padded.cyan().bold().to_string(),
            _ => padded.dark_grey().to_string(),
        }
    }

    pub fn statuses(&self, out: &mut dyn Write, statuses: &[ConnectionStatus]) -> io::Result<()> {
        if self.json {
            serde_json::to_writer_pretty(&mut *out, statuses)?;
            return writeln!(out);
        }
        if statuses.is_empty() {
            return writeln!(out, "No connections to report.");
        }

        let name_width = statuses
            .iter()
            .map(|s| s.name.chars().count())
            .chain(std::iter::once("NAME".len()))
            .max()
            .unwrap_or(4);
        let role_width = "PRIVATE".len();
        let header = format!(
            "{:<name_width$}  {:<role_width$}  {:<8}  {}",
            "NAME", "SHARING", "STATUS", "TYPE"
        );
        if self.color {
            writeln!(out, "{}", header.bold())?;
        } else {
            writeln!(out, "{}", header)?;
        }
        for status in statuses {
            writeln!(
                out,
                "{:<name_width$}  {}  {:<8}  {}",
                status.name,
                self.role_cell(status, role_width),
                status.status.to_string(),
                status.media_type
            )?;
        }
        Ok(())
    }

    pub fn set_sharing(
        &self,
        out: &mut dyn Write,
        outcome: &SetSharingOutcome,
        pass_through: bool,
    ) -> io::Result<()> {
        if self.json {
            let value = match outcome {
                SetSharingOutcome::AlreadySet { public, private } => json!({
                    "result": "already-set",
                    "actions": [],
                    "public": public,
                    "private": private,
                }),
                SetSharingOutcome::Applied {
                    actions,
                    public,
                    private,
                } => json!({
                    "result": "applied",
                    "actions": action_texts(actions),
                    "public": public,
                    "private": private,
                }),
                SetSharingOutcome::DryRun { actions } => json!({
                    "result": "dry-run",
                    "actions": action_texts(actions),
                }),
                SetSharingOutcome::Declined { executed, declined } => json!({
                    "result": "declined",
                    "actions": action_texts(executed),
                    "declined": declined.to_string(),
                }),
            };
            serde_json::to_writer_pretty(&mut *out, &value)?;
            return writeln!(out);
        }

        match outcome {
            SetSharingOutcome::AlreadySet { public, private } => {
                writeln!(
                    out,
                    "Sharing from '{}' to '{}' is already set.",
                    public.name, private.name
                )?;
                if pass_through {
                    self.statuses(out, &[public.clone(), private.clone()])?;
                }
            }
            SetSharingOutcome::Applied {
                actions,
                public,
                private,
            } => {
                for action in actions {
                    writeln!(out, "{}", action)?;
                }
                writeln!(
                    out,
                    "Sharing enabled from '{}' (public) to '{}' (private).",
                    public.name, private.name
                )?;
                if pass_through {
                    self.statuses(out, &[public.clone(), private.clone()])?;
                }
            }
            SetSharingOutcome::DryRun { actions } => self.dry_run(out, actions)?,
            SetSharingOutcome::Declined { executed, declined } => {
                for action in executed {
                    writeln!(out, "{}", action)?;
                }
                writeln!(out, "Declined: {}. No further changes made.", declined)?;
            }
        }
        Ok(())
    }

    pub fn disable_sharing(
        &self,
        out: &mut dyn Write,
        outcome: &DisableOutcome,
        dry_run: bool,
        pass_through: bool,
    ) -> io::Result<()> {
        if self.json {
            let value = if dry_run {
                json!({ "result": "dry-run", "actions": action_texts(&outcome.actions) })
            } else {
                json!({
                    "result": "applied",
                    "changed": outcome.changed,
                    "skipped": outcome.skipped,
                    "after": outcome.after,
                })
            };
            serde_json::to_writer_pretty(&mut *out, &value)?;
            return writeln!(out);
        }

        if outcome.actions.is_empty() {
            return writeln!(out, "Sharing is not enabled on any connection.");
        }
        if dry_run {
            return self.dry_run(out, &outcome.actions);
        }
        for name in &outcome.changed {
            writeln!(out, "Disabled sharing on '{}'.", name)?;
        }
        for name in &outcome.skipped {
            writeln!(out, "Skipped '{}'.", name)?;
        }
        if pass_through && !outcome.after.is_empty() {
            self.statuses(out, &outcome.after)?;
        }
        Ok(())
    }

    fn dry_run(&self, out: &mut dyn Write, actions: &[SharingAction]) -> io::Result<()> {
        for action in actions {
            writeln!(out, "What if: {}", action)?;
        }
        Ok(())
    }

    pub fn profiles(&self, out: &mut dyn Write, profiles: &[SharingProfile]) -> io::Result<()> {
        if self.json {
            serde_json::to_writer_pretty(&mut *out, profiles)?;
            return writeln!(out);
        }
        if profiles.is_empty() {
            return writeln!(out, "No saved profiles.");
        }
        for profile in profiles {
            writeln!(
                out,
                "{}: '{}' (public) -> '{}' (private)",
                profile.name, profile.public, profile.private
            )?;
        }
        Ok(())
    }

    pub fn settings(&self, out: &mut dyn Write, settings: &Settings) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, settings)?;
        writeln!(out)
    }
}

fn action_texts(actions: &[SharingAction]) -> Vec<String> {
    actions.iter().map(ToString::to_string).collect()
}
