//! Resolution of the credentials used to reach the Kubernetes API.
//!
//! Either the pod's own service account (when running inside the cluster)
//! or a kubeconfig file on disk, `~/.kube/config` unless overridden.

use crate::{AllocatorError, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::Config;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    InCluster,
    Kubeconfig(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::InCluster => write!(f, "in-cluster service account"),
            ConfigSource::Kubeconfig(path) => write!(f, "kubeconfig {}", path.display()),
        }
    }
}

pub fn default_kubeconfig_path() -> Result<PathBuf> {
    kubeconfig_path_from(|key| std::env::var(key).ok())
}

// HOME first, USERPROFILE for Windows.
fn kubeconfig_path_from<F>(lookup: F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let home = ["HOME", "USERPROFILE"]
        .into_iter()
        .filter_map(|key| lookup(key))
        .find(|value| !value.is_empty())
        .ok_or_else(|| {
            AllocatorError::ConfigError(
                "cannot locate kubeconfig: neither HOME nor USERPROFILE is set".to_string(),
            )
        })?;

    Ok(Path::new(&home).join(".kube").join("config"))
}

pub async fn resolve_config(source: &ConfigSource) -> Result<Config> {
    debug!("Resolving Kubernetes config from {}", source);

    match source {
        ConfigSource::InCluster => Config::incluster().map_err(|e| {
            AllocatorError::ConfigError(format!("Failed to load in-cluster config: {}", e))
        }),
        ConfigSource::Kubeconfig(path) => load_kubeconfig(path).await,
    }
}

async fn load_kubeconfig(path: &Path) -> Result<Config> {
    let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
        AllocatorError::ConfigError(format!(
            "Failed to read kubeconfig {}: {}",
            path.display(),
            e
        ))
    })?;

    Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .map_err(|e| {
            AllocatorError::ConfigError(format!(
                "Failed to load kubeconfig {}: {}",
                path.display(),
                e
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    const KUBECONFIG: &str = r#"
apiVersion: v1
kind: Config
current-context: dev
clusters:
  - name: dev
    cluster:
      server: https://127.0.0.1:6443
contexts:
  - name: dev
    context:
      cluster: dev
      user: dev
      namespace: game-ns
users:
  - name: dev
    user:
      token: dev-token
"#;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_kubeconfig_path_prefers_home() {
        let path =
            kubeconfig_path_from(env(&[("HOME", "/home/dev"), ("USERPROFILE", "C:\\dev")]))
                .unwrap();
        assert_eq!(path, PathBuf::from("/home/dev/.kube/config"));
    }

    #[test]
    fn test_kubeconfig_path_falls_back_to_userprofile() {
        let path = kubeconfig_path_from(env(&[("HOME", ""), ("USERPROFILE", "/users/dev")]))
            .unwrap();
        assert_eq!(path, PathBuf::from("/users/dev/.kube/config"));
    }

    #[test]
    fn test_kubeconfig_path_without_home() {
        let err = kubeconfig_path_from(env(&[])).unwrap_err();
        assert!(matches!(err, AllocatorError::ConfigError(_)));
    }

    #[tokio::test]
    async fn test_load_kubeconfig_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(KUBECONFIG.as_bytes()).unwrap();

        let source = ConfigSource::Kubeconfig(file.path().to_path_buf());
        let config = resolve_config(&source).await.unwrap();

        assert_eq!(config.cluster_url.host(), Some("127.0.0.1"));
        assert_eq!(config.cluster_url.port_u16(), Some(6443));
        assert_eq!(config.default_namespace, "game-ns");
    }

    #[tokio::test]
    async fn test_missing_kubeconfig_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = ConfigSource::Kubeconfig(dir.path().join("missing"));

        let err = resolve_config(&source).await.unwrap_err();
        assert!(matches!(err, AllocatorError::ConfigError(_)));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_source_display() {
        assert_eq!(
            ConfigSource::InCluster.to_string(),
            "in-cluster service account"
        );
        assert_eq!(
            ConfigSource::Kubeconfig(PathBuf::from("/tmp/kc")).to_string(),
            "kubeconfig /tmp/kc"
        );
    }
}
