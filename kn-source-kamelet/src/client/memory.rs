use super::{ClientError, KameletClient};
use kamelet::{Kamelet, KameletBinding};
use kube::error::ErrorResponse;
use std::collections::BTreeMap;
use std::sync::Mutex;
use url::Url;

/// Records which calls the plugin made against [`MemoryClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetKamelet(String),
    ListKamelets,
    GetBinding(String),
    CreateBinding(String),
    ReplaceBinding(String),
}

/// An in-memory cluster holding Kamelets and KameletBindings keyed by `(namespace, name)`.
pub struct MemoryClient {
    cluster_url: Url,
    kamelets: Vec<Kamelet>,
    bindings: Mutex<BTreeMap<(String, String), KameletBinding>>,
    calls: Mutex<Vec<Call>>,
    failures: Mutex<Vec<(Call, ClientError)>>,
    resource_version: Mutex<u64>,
}

/// An API server error as `kube` reports it.
pub fn api_error(code: u16, reason: &str, message: &str) -> ClientError {
    ClientError::Kube(kube::Error::Api(ErrorResponse {
        status: "Failure".into(),
        message: message.into(),
        reason: reason.into(),
        code,
    }))
}

impl MemoryClient {
    pub fn new() -> Self {
        MemoryClient {
            cluster_url: "https://cluster.local:6443/".parse().unwrap(),
            kamelets: vec![],
            bindings: Mutex::new(BTreeMap::new()),
            calls: Mutex::new(vec![]),
            failures: Mutex::new(vec![]),
            resource_version: Mutex::new(0),
        }
    }

    pub fn with_kamelet(mut self, kamelet: Kamelet) -> Self {
        self.kamelets.push(kamelet);
        self
    }

    /// Fail the next `call` with `err` instead of serving it.
    pub fn failing(self, call: Call, err: ClientError) -> Self {
        self.failures.lock().unwrap().push((call, err));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn bindings(&self) -> Vec<KameletBinding> {
        self.bindings.lock().unwrap().values().cloned().collect()
    }

    fn record(&self, call: Call) -> Result<(), ClientError> {
        let mut failures = self.failures.lock().unwrap();
        let failure = failures.iter().position(|(failing, _)| *failing == call);
        self.calls.lock().unwrap().push(call);
        match failure {
            Some(index) => Err(failures.remove(index).1),
            None => Ok(()),
        }
    }

    fn next_resource_version(&self) -> String {
        let mut version = self.resource_version.lock().unwrap();
        *version += 1;
        version.to_string()
    }
}

fn key(namespace: &str, binding: &KameletBinding) -> (String, String) {
    (
        namespace.to_string(),
        binding.metadata.name.clone().unwrap_or_default(),
    )
}

#[async_trait::async_trait]
impl KameletClient for MemoryClient {
    fn cluster_url(&self) -> &Url {
        &self.cluster_url
    }

    fn default_namespace(&self) -> &str {
        "default"
    }

    async fn get_kamelet(&self, namespace: &str, name: &str) -> Result<Kamelet, ClientError> {
        self.record(Call::GetKamelet(name.to_string()))?;
        self.kamelets
            .iter()
            .find(|k| {
                k.metadata.namespace.as_deref() == Some(namespace)
                    && k.metadata.name.as_deref() == Some(name)
            })
            .cloned()
            .ok_or_else(|| ClientError::NotFound {
                kind: "Kamelet",
                name: name.to_string(),
                message: format!("kamelets.camel.apache.org {name:?} not found"),
            })
    }

    async fn list_kamelets(&self, namespace: &str) -> Result<Vec<Kamelet>, ClientError> {
        self.record(Call::ListKamelets)?;
        Ok(self
            .kamelets
            .iter()
            .filter(|k| k.metadata.namespace.as_deref() == Some(namespace))
            .cloned()
            .collect())
    }

    async fn get_binding(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<KameletBinding, ClientError> {
        self.record(Call::GetBinding(name.to_string()))?;
        self.bindings
            .lock()
            .unwrap()
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| ClientError::NotFound {
                kind: "KameletBinding",
                name: name.to_string(),
                message: format!("kameletbindings.camel.apache.org {name:?} not found"),
            })
    }

    async fn create_binding(
        &self,
        namespace: &str,
        binding: &KameletBinding,
    ) -> Result<KameletBinding, ClientError> {
        let key = key(namespace, binding);
        self.record(Call::CreateBinding(key.1.clone()))?;
        let mut bindings = self.bindings.lock().unwrap();
        if bindings.contains_key(&key) {
            return Err(ClientError::AlreadyExists {
                kind: "KameletBinding",
                name: key.1,
            });
        }
        let mut created = binding.clone();
        created.metadata.resource_version = Some(self.next_resource_version());
        bindings.insert(key, created.clone());
        Ok(created)
    }

    async fn replace_binding(
        &self,
        namespace: &str,
        binding: &KameletBinding,
    ) -> Result<KameletBinding, ClientError> {
        let key = key(namespace, binding);
        self.record(Call::ReplaceBinding(key.1.clone()))?;
        let mut bindings = self.bindings.lock().unwrap();
        let current = bindings.get(&key).ok_or_else(|| ClientError::NotFound {
            kind: "KameletBinding",
            name: key.1.clone(),
            message: format!("kameletbindings.camel.apache.org {:?} not found", key.1),
        })?;
        // the API server rejects writes carrying a stale version with 409 Conflict
        assert_eq!(
            current.metadata.resource_version, binding.metadata.resource_version,
            "replace must carry the current resource version"
        );
        let mut replaced = binding.clone();
        replaced.metadata.resource_version = Some(self.next_resource_version());
        bindings.insert(key, replaced.clone());
        Ok(replaced)
    }
}
