use clap::Parser;
use std::path::PathBuf;

use crate::k8s::config::{default_kubeconfig_path, ConfigSource};
use crate::Result;

pub const DEFAULT_PORT: u16 = 8888;

#[derive(Parser, Debug)]
#[command(name = "fleet-allocator")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Allocates Agones game servers from a fleet over HTTP", long_about = None)]
pub struct Cli {
    #[arg(help = "Namespace the fleet lives in")]
    pub namespace: String,

    #[arg(help = "Name of the fleet to allocate from")]
    pub fleet: String,

    #[arg(long, help = "Use the in-cluster service account instead of a kubeconfig")]
    pub in_cluster: bool,

    #[arg(
        long,
        conflicts_with = "in_cluster",
        help = "Path to kubeconfig (defaults to ~/.kube/config)"
    )]
    pub kubeconfig: Option<PathBuf>,

    #[arg(short, long, default_value_t = DEFAULT_PORT, help = "Port to listen on")]
    pub port: u16,

    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,
}

impl Cli {
    /// Where Kubernetes credentials come from, as selected by the flags.
    pub fn config_source(&self) -> Result<ConfigSource> {
        if self.in_cluster {
            return Ok(ConfigSource::InCluster);
        }

        let path = match &self.kubeconfig {
            Some(path) => path.clone(),
            None => default_kubeconfig_path()?,
        };

        Ok(ConfigSource::Kubeconfig(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_args() {
        let cli = Cli::try_parse_from(["fleet-allocator", "game-ns", "my-fleet"]).unwrap();

        assert_eq!(cli.namespace, "game-ns");
        assert_eq!(cli.fleet, "my-fleet");
        assert_eq!(cli.port, DEFAULT_PORT);
        assert!(!cli.in_cluster);
        assert!(cli.kubeconfig.is_none());
    }

    #[test]
    fn test_missing_fleet_is_rejected() {
        let err = Cli::try_parse_from(["fleet-allocator", "game-ns"]).unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_missing_all_args_is_rejected() {
        assert!(Cli::try_parse_from(["fleet-allocator"]).is_err());
    }

    #[test]
    fn test_in_cluster_source() {
        let cli =
            Cli::try_parse_from(["fleet-allocator", "--in-cluster", "game-ns", "my-fleet"]).unwrap();

        assert!(matches!(cli.config_source().unwrap(), ConfigSource::InCluster));
    }

    #[test]
    fn test_explicit_kubeconfig_source() {
        let cli = Cli::try_parse_from([
            "fleet-allocator",
            "--kubeconfig",
            "/tmp/kubeconfig",
            "-p",
            "9000",
            "game-ns",
            "my-fleet",
        ])
        .unwrap();

        assert_eq!(cli.port, 9000);
        match cli.config_source().unwrap() {
            ConfigSource::Kubeconfig(path) => assert_eq!(path, PathBuf::from("/tmp/kubeconfig")),
            other => panic!("unexpected source: {:?}", other),
        }
    }

    #[test]
    fn test_in_cluster_conflicts_with_kubeconfig() {
        let result = Cli::try_parse_from([
            "fleet-allocator",
            "--in-cluster",
            "--kubeconfig",
            "/tmp/kubeconfig",
            "game-ns",
            "my-fleet",
        ]);

        assert!(result.is_err());
    }
}
