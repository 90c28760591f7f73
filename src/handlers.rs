use crate::error::HandlerError;
use crate::gateway::{ResourceKind, ResourceQuantity};
use crate::prompt;
use crate::registry::{Flow, Handler, HandlerContext};
use tracing::debug;

// Shared pick-a-target step: list names, then run the numbered selector.
// None means there was nothing to pick and the command loop should move on.
fn select_resource(
    ctx: &mut HandlerContext<'_>,
    kind: ResourceKind,
) -> Result<Option<String>, HandlerError> {
    let names = ctx.gateway.list_names(ctx.namespace, kind)?;
    if names.is_empty() {
        ctx.console.print_line(&format!(
            "No {} found in namespace {}",
            kind.plural(),
            ctx.namespace
        ))?;
        return Ok(None);
    }

    let heading = format!("Available {}:", kind.plural());
    let index = prompt::select_retrying(&mut *ctx.console, &heading, kind.singular(), &names)?;
    Ok(names.into_iter().nth(index))
}

pub struct ListPods;

impl Handler for ListPods {
    fn execute(&self, ctx: &mut HandlerContext<'_>) -> Result<Flow, HandlerError> {
        ctx.gateway.show_table(ctx.namespace, ResourceKind::Pods)?;
        Ok(Flow::Continue)
    }
}

pub struct ConnectShell;

impl Handler for ConnectShell {
    fn execute(&self, ctx: &mut HandlerContext<'_>) -> Result<Flow, HandlerError> {
        if let Some(pod) = select_resource(ctx, ResourceKind::Pods)? {
            debug!(%pod, "opening interactive shell");
            ctx.gateway.pod_shell(ctx.namespace, &pod)?;
        }
        Ok(Flow::Continue)
    }
}

pub struct TailLogs;

impl Handler for TailLogs {
    fn execute(&self, ctx: &mut HandlerContext<'_>) -> Result<Flow, HandlerError> {
        if let Some(pod) = select_resource(ctx, ResourceKind::Pods)? {
            ctx.gateway.pod_logs(ctx.namespace, &pod)?;
        }
        Ok(Flow::Continue)
    }
}

pub struct Describe;

impl Handler for Describe {
    fn execute(&self, ctx: &mut HandlerContext<'_>) -> Result<Flow, HandlerError> {
        if let Some(pod) = select_resource(ctx, ResourceKind::Pods)? {
            ctx.gateway.describe_pod(ctx.namespace, &pod)?;
        }
        Ok(Flow::Continue)
    }
}

pub struct DumpEnv;

impl Handler for DumpEnv {
    fn execute(&self, ctx: &mut HandlerContext<'_>) -> Result<Flow, HandlerError> {
        if let Some(pod) = select_resource(ctx, ResourceKind::Pods)? {
            ctx.gateway.pod_env(ctx.namespace, &pod)?;
        }
        Ok(Flow::Continue)
    }
}

pub struct AdjustResources {
    pub quantity: ResourceQuantity,
}

impl Handler for AdjustResources {
    fn execute(&self, ctx: &mut HandlerContext<'_>) -> Result<Flow, HandlerError> {
        let Some(pod) = select_resource(ctx, ResourceKind::Pods)? else {
            return Ok(Flow::Continue);
        };

        ctx.console.print_line("\nCurrent container resources:")?;
        ctx.gateway.show_pod_resources(ctx.namespace, &pod)?;

        let value = prompt::read_value(&mut *ctx.console, self.quantity.prompt())?;
        ctx.gateway
            .patch_pod_resources(ctx.namespace, &pod, self.quantity, &value)?;
        Ok(Flow::Continue)
    }
}

pub struct Scale;

impl Handler for Scale {
    fn execute(&self, ctx: &mut HandlerContext<'_>) -> Result<Flow, HandlerError> {
        let Some(deployment) = select_resource(ctx, ResourceKind::Deployments)? else {
            return Ok(Flow::Continue);
        };

        ctx.console.print("\nCurrent replicas: ")?;
        ctx.gateway.show_replicas(ctx.namespace, &deployment)?;

        let replicas = prompt::read_value(&mut *ctx.console, "\nEnter new number of replicas: ")?;
        ctx.gateway
            .scale_deployment(ctx.namespace, &deployment, &replicas)?;
        Ok(Flow::Continue)
    }
}

pub struct Forward;

impl Handler for Forward {
    fn execute(&self, ctx: &mut HandlerContext<'_>) -> Result<Flow, HandlerError> {
        let Some(service) = select_resource(ctx, ResourceKind::Services)? else {
            return Ok(Flow::Continue);
        };

        ctx.console.print("\nAvailable ports: ")?;
        ctx.gateway.show_service_ports(ctx.namespace, &service)?;

        let target_port = prompt::read_value(&mut *ctx.console, "\nEnter target port: ")?;
        let local_port =
            prompt::read_value(&mut *ctx.console, "Enter local port to forward to: ")?;

        ctx.console.print_line(&format!(
            "\nStarting port forward from localhost:{local_port} to service {service}:{target_port}"
        ))?;
        ctx.gateway
            .port_forward(ctx.namespace, &service, &local_port, &target_port)?;
        Ok(Flow::Continue)
    }
}

pub struct Quit;

impl Handler for Quit {
    fn execute(&self, _ctx: &mut HandlerContext<'_>) -> Result<Flow, HandlerError> {
        Ok(Flow::Terminate)
    }
}
