use super::{ClientError, KameletClient};
use kamelet::{Kamelet, KameletBinding};
use kube::api::{Api, ListParams, PostParams};
use kube::{Client, Config};
use tracing::debug;
use url::Url;

const KAMELET: &str = "Kamelet";
const KAMELET_BINDING: &str = "KameletBinding";

/// [`KameletClient`] backed by the Kubernetes API server.
#[derive(Clone)]
pub struct KubeKameletClient {
    client: Client,
    cluster_url: Url,
    default_namespace: String,
}

impl KubeKameletClient {
    /// Connect using the kubeconfig, or the in-cluster environment when there is none.
    pub async fn infer() -> Result<Self, ClientError> {
        let config = Config::infer().await?;
        let cluster_url = Url::parse(&config.cluster_url.to_string())?;
        let default_namespace = config.default_namespace.clone();
        debug!(%cluster_url, %default_namespace, "inferred cluster config");
        let client = Client::try_from(config).map_err(ClientError::Kube)?;
        Ok(KubeKameletClient {
            client,
            cluster_url,
            default_namespace,
        })
    }

    fn kamelets(&self, namespace: &str) -> Api<Kamelet> {
        Api::namespaced(self.client.clone(), namespace)
    }

    fn bindings(&self, namespace: &str) -> Api<KameletBinding> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

/// Reads map a 404 to [`ClientError::NotFound`], keeping the server message.
fn not_found<'a>(
    kind: &'static str,
    name: &'a str,
) -> impl FnOnce(kube::Error) -> ClientError + 'a {
    move |err| match err {
        kube::Error::Api(response) if response.code == 404 => ClientError::NotFound {
            kind,
            name: name.to_string(),
            message: response.message,
        },
        err => ClientError::Kube(err),
    }
}

/// Writes only single out `AlreadyExists`, everything else is passed through.
fn already_exists<'a>(
    kind: &'static str,
    name: &'a str,
) -> impl FnOnce(kube::Error) -> ClientError + 'a {
    move |err| match err {
        kube::Error::Api(ref response) if response.reason == "AlreadyExists" => {
            ClientError::AlreadyExists {
                kind,
                name: name.to_string(),
            }
        }
        err => ClientError::Kube(err),
    }
}

fn binding_name(binding: &KameletBinding) -> &str {
    binding.metadata.name.as_deref().unwrap_or_default()
}

#[async_trait::async_trait]
impl KameletClient for KubeKameletClient {
    fn cluster_url(&self) -> &Url {
        &self.cluster_url
    }

    /// The namespace of the current kubeconfig context.
    fn default_namespace(&self) -> &str {
        &self.default_namespace
    }

    async fn get_kamelet(&self, namespace: &str, name: &str) -> Result<Kamelet, ClientError> {
        self.kamelets(namespace)
            .get(name)
            .await
            .map_err(not_found(KAMELET, name))
    }

    async fn list_kamelets(&self, namespace: &str) -> Result<Vec<Kamelet>, ClientError> {
        let list = self
            .kamelets(namespace)
            .list(&ListParams::default())
            .await
            .map_err(ClientError::Kube)?;
        Ok(list.items)
    }

    async fn get_binding(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<KameletBinding, ClientError> {
        self.bindings(namespace)
            .get(name)
            .await
            .map_err(not_found(KAMELET_BINDING, name))
    }

    async fn create_binding(
        &self,
        namespace: &str,
        binding: &KameletBinding,
    ) -> Result<KameletBinding, ClientError> {
        self.bindings(namespace)
            .create(&PostParams::default(), binding)
            .await
            .map_err(already_exists(KAMELET_BINDING, binding_name(binding)))
    }

    async fn replace_binding(
        &self,
        namespace: &str,
        binding: &KameletBinding,
    ) -> Result<KameletBinding, ClientError> {
        self.bindings(namespace)
            .replace(binding_name(binding), &PostParams::default(), binding)
            .await
            .map_err(ClientError::Kube)
    }
}
