use crate::error::{HandlerError, RegistryIntegrityError};
use crate::gateway::{ClusterGateway, ResourceQuantity};
use crate::handlers;
use crate::prompt::Console;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    ShowPods,
    ConnectPod,
    ShowLogs,
    DescribePod,
    ShowEnv,
    AdjustCpu,
    AdjustMemory,
    ScaleDeployment,
    PortForward,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CommandSet {
    /// Pod inspection commands only
    Basic,
    /// Adds resource adjustment, scaling and port forwarding
    #[default]
    Extended,
}

const BASIC_ORDER: &[CommandKind] = &[
    CommandKind::ShowPods,
    CommandKind::ConnectPod,
    CommandKind::ShowLogs,
    CommandKind::DescribePod,
    CommandKind::ShowEnv,
    CommandKind::Exit,
];

const EXTENDED_ORDER: &[CommandKind] = &[
    CommandKind::ShowPods,
    CommandKind::ConnectPod,
    CommandKind::ShowLogs,
    CommandKind::DescribePod,
    CommandKind::ShowEnv,
    CommandKind::AdjustCpu,
    CommandKind::AdjustMemory,
    CommandKind::ScaleDeployment,
    CommandKind::PortForward,
    CommandKind::Exit,
];

impl CommandSet {
    pub fn display_order(self) -> &'static [CommandKind] {
        match self {
            Self::Basic => BASIC_ORDER,
            Self::Extended => EXTENDED_ORDER,
        }
    }
}

// Tells the command loop whether to keep going after a handler ran. Only the
// session controller ends the loop; no handler exits the process itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Terminate,
}

pub struct HandlerContext<'a> {
    pub namespace: &'a str,
    pub gateway: &'a dyn ClusterGateway,
    pub console: &'a mut dyn Console,
}

pub trait Handler {
    fn execute(&self, ctx: &mut HandlerContext<'_>) -> Result<Flow, HandlerError>;
}

pub struct CommandDescriptor {
    pub kind: CommandKind,
    pub description: &'static str,
    pub handler: Box<dyn Handler>,
}

// Built once at session start; the full command table is always registered,
// the capability set only controls which entries the menu presents.
pub struct CommandRegistry {
    commands: HashMap<CommandKind, CommandDescriptor>,
    order: &'static [CommandKind],
}

impl CommandRegistry {
    pub fn new(set: CommandSet) -> Self {
        let descriptors: Vec<CommandDescriptor> = vec![
            CommandDescriptor {
                kind: CommandKind::ShowPods,
                description: "List all pods",
                handler: Box::new(handlers::ListPods),
            },
            CommandDescriptor {
                kind: CommandKind::ConnectPod,
                description: "Connect to a pod",
                handler: Box::new(handlers::ConnectShell),
            },
            CommandDescriptor {
                kind: CommandKind::ShowLogs,
                description: "Show pod logs",
                handler: Box::new(handlers::TailLogs),
            },
            CommandDescriptor {
                kind: CommandKind::DescribePod,
                description: "Describe pod",
                handler: Box::new(handlers::Describe),
            },
            CommandDescriptor {
                kind: CommandKind::ShowEnv,
                description: "Show environment variables",
                handler: Box::new(handlers::DumpEnv),
            },
            CommandDescriptor {
                kind: CommandKind::AdjustCpu,
                description: "Adjust pod CPU resources",
                handler: Box::new(handlers::AdjustResources {
                    quantity: ResourceQuantity::Cpu,
                }),
            },
            CommandDescriptor {
                kind: CommandKind::AdjustMemory,
                description: "Adjust pod memory resources",
                handler: Box::new(handlers::AdjustResources {
                    quantity: ResourceQuantity::Memory,
                }),
            },
            CommandDescriptor {
                kind: CommandKind::ScaleDeployment,
                description: "Scale deployment replicas",
                handler: Box::new(handlers::Scale),
            },
            CommandDescriptor {
                kind: CommandKind::PortForward,
                description: "Port forward service to localhost",
                handler: Box::new(handlers::Forward),
            },
            CommandDescriptor {
                kind: CommandKind::Exit,
                description: "Exit program",
                handler: Box::new(handlers::Quit),
            },
        ];

        let mut commands = HashMap::new();
        for descriptor in descriptors {
            commands.insert(descriptor.kind, descriptor);
        }

        Self {
            commands,
            order: set.display_order(),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(
        commands: HashMap<CommandKind, CommandDescriptor>,
        order: &'static [CommandKind],
    ) -> Self {
        Self { commands, order }
    }

    pub fn display_order(&self) -> &[CommandKind] {
        self.order
    }

    pub fn get(&self, kind: CommandKind) -> Option<&CommandDescriptor> {
        self.commands.get(&kind)
    }

    // Static registration means this can only fail on a programming error;
    // the session reports it loudly instead of crashing.
    pub fn verify(&self) -> Result<(), RegistryIntegrityError> {
        for kind in self.order {
            if !self.commands.contains_key(kind) {
                return Err(RegistryIntegrityError { kind: *kind });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{CommandKind, CommandRegistry, CommandSet};
    use std::collections::HashMap;

    #[test]
    fn basic_order_ends_with_exit() {
        let registry = CommandRegistry::new(CommandSet::Basic);
        assert_eq!(
            registry.display_order(),
            &[
                CommandKind::ShowPods,
                CommandKind::ConnectPod,
                CommandKind::ShowLogs,
                CommandKind::DescribePod,
                CommandKind::ShowEnv,
                CommandKind::Exit,
            ]
        );
    }

    #[test]
    fn extended_order_adds_workload_commands_before_exit() {
        let registry = CommandRegistry::new(CommandSet::Extended);
        let order = registry.display_order();
        assert_eq!(order.len(), 10);
        assert_eq!(order[5], CommandKind::AdjustCpu);
        assert_eq!(order[8], CommandKind::PortForward);
        assert_eq!(*order.last().unwrap(), CommandKind::Exit);
    }

    #[test]
    fn every_displayed_command_has_a_descriptor() {
        for set in [CommandSet::Basic, CommandSet::Extended] {
            let registry = CommandRegistry::new(set);
            registry.verify().unwrap();
            for kind in registry.display_order() {
                let descriptor = registry.get(*kind).unwrap();
                assert_eq!(descriptor.kind, *kind);
                assert!(!descriptor.description.is_empty());
            }
        }
    }

    #[test]
    fn display_order_is_independent_of_map_layout() {
        // Two registries share the same declared sequence regardless of how
        // the HashMap happens to iterate.
        let first = CommandRegistry::new(CommandSet::Extended);
        let second = CommandRegistry::new(CommandSet::Extended);
        assert_eq!(first.display_order(), second.display_order());
        let map_order: Vec<CommandKind> = first.commands.keys().copied().collect();
        assert_eq!(map_order.len(), first.display_order().len());
    }

    #[test]
    fn missing_descriptor_fails_verification() {
        let registry = CommandRegistry::from_parts(HashMap::new(), &[CommandKind::ShowPods]);
        let error = registry.verify().unwrap_err();
        assert_eq!(error.kind, CommandKind::ShowPods);
    }
}
