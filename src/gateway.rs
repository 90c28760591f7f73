use crate::config::ClusterProfile;
use crate::error::{ConnectionError, HandlerError};
use serde_json::json;
use std::process::{Command, Stdio};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Pods,
    Deployments,
    Services,
}

impl ResourceKind {
    pub fn plural(self) -> &'static str {
        match self {
            Self::Pods => "pods",
            Self::Deployments => "deployments",
            Self::Services => "services",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            Self::Pods => "pod",
            Self::Deployments => "deployment",
            Self::Services => "service",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceQuantity {
    Cpu,
    Memory,
}

impl ResourceQuantity {
    pub fn key(self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Memory => "memory",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            Self::Cpu => "\nEnter new CPU value (e.g. '500m' for 500 millicores or '2' for 2 cores): ",
            Self::Memory => "\nEnter new memory value (e.g. '512Mi' or '2Gi'): ",
        }
    }
}

// Everything the session does against the cluster goes through this seam.
// The real implementation shells out to gcloud/kubectl; tests substitute a
// scripted double.
pub trait ClusterGateway {
    fn authenticate(&self, profile: &ClusterProfile) -> Result<(), ConnectionError>;

    // Names only: first whitespace token of each `--no-headers` output line.
    fn list_names(&self, namespace: &str, kind: ResourceKind) -> Result<Vec<String>, HandlerError>;

    // Passthrough table listing, streamed straight to the terminal.
    fn show_table(&self, namespace: &str, kind: ResourceKind) -> Result<(), HandlerError>;

    fn pod_shell(&self, namespace: &str, pod: &str) -> Result<(), HandlerError>;
    fn pod_logs(&self, namespace: &str, pod: &str) -> Result<(), HandlerError>;
    fn describe_pod(&self, namespace: &str, pod: &str) -> Result<(), HandlerError>;
    fn pod_env(&self, namespace: &str, pod: &str) -> Result<(), HandlerError>;

    fn show_pod_resources(&self, namespace: &str, pod: &str) -> Result<(), HandlerError>;
    fn patch_pod_resources(
        &self,
        namespace: &str,
        pod: &str,
        quantity: ResourceQuantity,
        value: &str,
    ) -> Result<(), HandlerError>;

    fn show_replicas(&self, namespace: &str, deployment: &str) -> Result<(), HandlerError>;
    fn scale_deployment(
        &self,
        namespace: &str,
        deployment: &str,
        replicas: &str,
    ) -> Result<(), HandlerError>;

    fn show_service_ports(&self, namespace: &str, service: &str) -> Result<(), HandlerError>;
    fn port_forward(
        &self,
        namespace: &str,
        service: &str,
        local_port: &str,
        target_port: &str,
    ) -> Result<(), HandlerError>;
}

pub struct CommandLineGateway;

impl CommandLineGateway {
    // Hands the terminal to the child for its whole lifetime; the exit code
    // is the only thing inspected.
    fn passthrough(&self, label: &str, args: &[&str]) -> Result<(), HandlerError> {
        debug!(command = label, ?args, "invoking kubectl");
        let status = Command::new("kubectl")
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| HandlerError::Spawn {
                tool: "kubectl",
                source,
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(HandlerError::ExternalCommand {
                command: label.to_string(),
                status: status.to_string(),
            })
        }
    }
}

impl ClusterGateway for CommandLineGateway {
    fn authenticate(&self, profile: &ClusterProfile) -> Result<(), ConnectionError> {
        debug!(
            cluster = %profile.cluster,
            zone = %profile.zone,
            project = %profile.project,
            "fetching cluster credentials"
        );
        let status = Command::new("gcloud")
            .args([
                "container",
                "clusters",
                "get-credentials",
                &profile.cluster,
                "--zone",
                &profile.zone,
                "--project",
                &profile.project,
            ])
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| ConnectionError::Spawn { source })?;
        if status.success() {
            Ok(())
        } else {
            Err(ConnectionError::AuthFailed {
                cluster: profile.cluster.clone(),
                status: status.to_string(),
            })
        }
    }

    fn list_names(&self, namespace: &str, kind: ResourceKind) -> Result<Vec<String>, HandlerError> {
        let args = ["get", kind.plural(), "-n", namespace, "--no-headers"];
        debug!(?args, "listing resource names");
        let output = Command::new("kubectl")
            .args(args)
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| HandlerError::Spawn {
                tool: "kubectl",
                source,
            })?;
        if !output.status.success() {
            return Err(HandlerError::ExternalCommand {
                command: format!("kubectl get {}", kind.plural()),
                status: output.status.to_string(),
            });
        }

        let names = String::from_utf8_lossy(&output.stdout)
            .lines()
            .filter_map(|line| line.split_whitespace().next().map(str::to_string))
            .collect();
        Ok(names)
    }

    fn show_table(&self, namespace: &str, kind: ResourceKind) -> Result<(), HandlerError> {
        self.passthrough(
            &format!("kubectl get {}", kind.plural()),
            &["get", kind.plural(), "-n", namespace],
        )
    }

    fn pod_shell(&self, namespace: &str, pod: &str) -> Result<(), HandlerError> {
        self.passthrough(
            "kubectl exec",
            &["exec", "-it", pod, "-n", namespace, "--", "/bin/sh"],
        )
    }

    fn pod_logs(&self, namespace: &str, pod: &str) -> Result<(), HandlerError> {
        self.passthrough("kubectl logs", &["logs", pod, "-n", namespace])
    }

    fn describe_pod(&self, namespace: &str, pod: &str) -> Result<(), HandlerError> {
        self.passthrough(
            "kubectl describe",
            &["describe", "pod", pod, "-n", namespace],
        )
    }

    fn pod_env(&self, namespace: &str, pod: &str) -> Result<(), HandlerError> {
        self.passthrough(
            "kubectl exec",
            &["exec", pod, "-n", namespace, "--", "env"],
        )
    }

    fn show_pod_resources(&self, namespace: &str, pod: &str) -> Result<(), HandlerError> {
        self.passthrough(
            "kubectl get pod",
            &[
                "get",
                "pod",
                pod,
                "-n",
                namespace,
                "-o",
                "jsonpath={.spec.containers[0].resources}",
            ],
        )
    }

    fn patch_pod_resources(
        &self,
        namespace: &str,
        pod: &str,
        quantity: ResourceQuantity,
        value: &str,
    ) -> Result<(), HandlerError> {
        let patch = json!({
            "spec": {
                "containers": [{
                    "name": "*",
                    "resources": {
                        "requests": { (quantity.key()): value },
                        "limits": { (quantity.key()): value },
                    },
                }],
            },
        });
        self.passthrough(
            "kubectl patch",
            &[
                "patch",
                "pod",
                pod,
                "-n",
                namespace,
                "--type=strategic",
                "-p",
                &patch.to_string(),
            ],
        )
    }

    fn show_replicas(&self, namespace: &str, deployment: &str) -> Result<(), HandlerError> {
        self.passthrough(
            "kubectl get deployment",
            &[
                "get",
                "deployment",
                deployment,
                "-n",
                namespace,
                "-o",
                "jsonpath={.spec.replicas}",
            ],
        )
    }

    fn scale_deployment(
        &self,
        namespace: &str,
        deployment: &str,
        replicas: &str,
    ) -> Result<(), HandlerError> {
        self.passthrough(
            "kubectl scale",
            &[
                "scale",
                "deployment",
                deployment,
                "-n",
                namespace,
                &format!("--replicas={replicas}"),
            ],
        )
    }

    fn show_service_ports(&self, namespace: &str, service: &str) -> Result<(), HandlerError> {
        self.passthrough(
            "kubectl get service",
            &[
                "get",
                "service",
                service,
                "-n",
                namespace,
                "-o",
                "jsonpath={.spec.ports[*].port}",
            ],
        )
    }

    fn port_forward(
        &self,
        namespace: &str,
        service: &str,
        local_port: &str,
        target_port: &str,
    ) -> Result<(), HandlerError> {
        self.passthrough(
            "kubectl port-forward",
            &[
                "port-forward",
                &format!("service/{service}"),
                &format!("{local_port}:{target_port}"),
                "-n",
                namespace,
            ],
        )
    }
}
