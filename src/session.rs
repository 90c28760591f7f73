use crate::config::{self, ClusterProfile};
use crate::error::{HandlerError, SelectionError, SessionError};
use crate::gateway::ClusterGateway;
use crate::prompt::{self, Console};
use crate::registry::{CommandRegistry, Flow, HandlerContext};
use crossterm::style::Stylize;
use std::path::Path;
use tracing::{debug, warn};

// How the session ended when no fatal error occurred. Both map to exit
// code 0; Cancelled never touched the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed,
    Cancelled,
}

pub struct Session<'a> {
    registry: CommandRegistry,
    gateway: &'a dyn ClusterGateway,
    console: &'a mut dyn Console,
}

impl<'a> Session<'a> {
    pub fn new(
        registry: CommandRegistry,
        gateway: &'a dyn ClusterGateway,
        console: &'a mut dyn Console,
    ) -> Self {
        Self {
            registry,
            gateway,
            console,
        }
    }

    pub fn run(&mut self, config_path: &Path) -> Result<SessionOutcome, SessionError> {
        let profiles = config::load(config_path)?;
        debug!(count = profiles.len(), "loaded cluster profiles");
        self.run_with_profiles(&profiles)
    }

    pub fn run_with_profiles(
        &mut self,
        profiles: &[ClusterProfile],
    ) -> Result<SessionOutcome, SessionError> {
        let environments: Vec<&str> = profiles
            .iter()
            .map(|profile| profile.environment.as_str())
            .collect();
        let index = prompt::select_retrying(
            &mut *self.console,
            "Available environments:",
            "environment",
            &environments,
        )?;
        let profile = &profiles[index];

        self.echo_profile(profile)?;
        if !prompt::confirm(&mut *self.console, "Continue? (y/n): ")? {
            self.console.print_line("Operation cancelled")?;
            return Ok(SessionOutcome::Cancelled);
        }

        self.gateway.authenticate(profile)?;
        debug!(cluster = %profile.cluster, "cluster credentials established");

        self.command_loop(&profile.namespace)
    }

    fn echo_profile(&mut self, profile: &ClusterProfile) -> Result<(), SessionError> {
        self.console
            .print_line(&format!("\n{}", "Selected configuration:".green()))?;
        self.console
            .print_line(&format!("Environment: {}", profile.environment))?;
        self.console
            .print_line(&format!("Project: {}", profile.project))?;
        self.console
            .print_line(&format!("Cluster: {}", profile.cluster))?;
        self.console.print_line(&format!("Zone: {}", profile.zone))?;
        self.console
            .print_line(&format!("Namespace: {}", profile.namespace))?;
        Ok(())
    }

    fn command_loop(&mut self, namespace: &str) -> Result<SessionOutcome, SessionError> {
        if let Err(error) = self.registry.verify() {
            warn!(%error, "command registry failed integrity check");
            self.console
                .print_line(&format!("{}", format!("Internal error: {error}").red()))?;
        }

        loop {
            let order = self.registry.display_order();
            let labels: Vec<String> = order
                .iter()
                .map(|kind| match self.registry.get(*kind) {
                    Some(descriptor) => descriptor.description.to_string(),
                    None => format!("(unregistered command {kind:?})"),
                })
                .collect();

            let index = prompt::select_retrying(
                &mut *self.console,
                "Available commands:",
                "command",
                &labels,
            )?;
            let kind = self.registry.display_order()[index];

            let Some(descriptor) = self.registry.get(kind) else {
                // Contract violation: declared in the display order but never
                // registered. Report loudly, keep serving the menu.
                warn!(?kind, "selected command has no registered handler");
                self.console.print_line(&format!(
                    "{}",
                    format!("Internal error: command {kind:?} is not registered").red()
                ))?;
                continue;
            };

            debug!(?kind, "dispatching command");
            let mut ctx = HandlerContext {
                namespace,
                gateway: self.gateway,
                console: &mut *self.console,
            };
            match descriptor.handler.execute(&mut ctx) {
                Ok(Flow::Terminate) => {
                    debug!("session terminated by operator");
                    return Ok(SessionOutcome::Completed);
                }
                Ok(Flow::Continue) => {}
                Err(HandlerError::Selection(
                    error @ (SelectionError::InputClosed | SelectionError::Io(_)),
                )) => return Err(SessionError::Selection(error)),
                Err(HandlerError::Io(error)) => return Err(SessionError::Io(error)),
                Err(error) => {
                    warn!(%error, ?kind, "command failed");
                    self.console
                        .print_line(&format!("{}", format!("Error: {error}").red()))?;
                }
            }
        }
    }
}
