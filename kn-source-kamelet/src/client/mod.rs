//! The cluster calls the plugin needs, behind [`KameletClient`].
mod kube_client;
#[cfg(test)]
pub(crate) mod memory;

pub use kube_client::KubeKameletClient;

use kamelet::{Kamelet, KameletBinding};
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Carries the message of the API server, which may name a missing namespace
    /// rather than the object itself.
    #[error("{message}")]
    NotFound {
        kind: &'static str,
        name: String,
        message: String,
    },
    #[error("{kind} {name:?} already exists")]
    AlreadyExists { kind: &'static str, name: String },
    #[error("unable to infer Kubeconfig: {0}")]
    InferConfig(#[from] kube::config::InferConfigError),
    #[error("unable to parse cluster url: {0}")]
    ClusterUrl(#[from] url::ParseError),
    #[error("{0}")]
    Kube(#[source] kube::Error),
}

impl ClientError {
    pub fn is_already_exists(&self) -> bool {
        matches!(self, ClientError::AlreadyExists { .. })
    }
}

/// Read and write access to Kamelets and KameletBindings of a cluster.
#[async_trait::async_trait]
pub trait KameletClient: Send + Sync {
    /// Base URL of the API server.
    fn cluster_url(&self) -> &Url;

    /// Namespace used when none is given on the command line.
    fn default_namespace(&self) -> &str;

    async fn get_kamelet(&self, namespace: &str, name: &str) -> Result<Kamelet, ClientError>;

    async fn list_kamelets(&self, namespace: &str) -> Result<Vec<Kamelet>, ClientError>;

    async fn get_binding(&self, namespace: &str, name: &str) -> Result<KameletBinding, ClientError>;

    /// Fails with [`ClientError::AlreadyExists`] when a binding of that name exists.
    async fn create_binding(
        &self,
        namespace: &str,
        binding: &KameletBinding,
    ) -> Result<KameletBinding, ClientError>;

    /// Overwrite an existing binding. The binding must carry the current resource version.
    async fn replace_binding(
        &self,
        namespace: &str,
        binding: &KameletBinding,
    ) -> Result<KameletBinding, ClientError>;
}
