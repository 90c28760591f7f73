use crate::registry::CommandSet;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "manta",
    version,
    about = "An interactive console for operating GKE workloads through gcloud and kubectl."
)]
pub struct CliArgs {
    /// Cluster profile file, one env|project|cluster|zone|namespace line per profile
    #[arg(required_unless_present = "list")]
    pub config: Option<PathBuf>,

    /// List the available command categories instead of starting a session
    #[arg(short, long)]
    pub list: bool,

    /// Which command set the session menu offers
    #[arg(long, value_enum, default_value_t = CommandSet::Extended)]
    pub command_set: CommandSet,

    /// tracing filter (for example: info,debug,trace)
    #[arg(long, default_value = "info")]
    pub log_filter: String,
}

#[cfg(test)]
mod tests {
    use super::CliArgs;
    use crate::registry::CommandSet;
    use clap::Parser;

    #[test]
    fn config_path_is_positional() {
        let args = CliArgs::parse_from(["manta", "clusters.conf"]);
        assert_eq!(args.config.unwrap().to_str(), Some("clusters.conf"));
        assert!(!args.list);
        assert_eq!(args.command_set, CommandSet::Extended);
    }

    #[test]
    fn list_flag_makes_the_path_optional() {
        let args = CliArgs::parse_from(["manta", "--list"]);
        assert!(args.list);
        assert!(args.config.is_none());
    }

    #[test]
    fn missing_path_without_list_is_rejected() {
        assert!(CliArgs::try_parse_from(["manta"]).is_err());
    }

    #[test]
    fn command_set_is_selectable() {
        let args = CliArgs::parse_from(["manta", "--command-set", "basic", "clusters.conf"]);
        assert_eq!(args.command_set, CommandSet::Basic);
    }
}
