use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use k8s_openapi::api::core::v1::Namespace;
use kube::api::ListParams;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Config};

use crate::error::ListError;

pub const DEFAULT_LIST_TIMEOUT: Duration = Duration::from_millis(500);

/// Source of namespace names for a context. One attempt per call, no retries.
pub trait NamespaceLister {
    fn list(&self, context: &str) -> impl Future<Output = Result<Vec<String>, ListError>> + Send;
}

/// Lists namespaces by talking to the cluster of the named context, using the
/// credentials from the kubeconfig at `path`.
#[derive(Debug, Clone)]
pub struct KubeNamespaceLister {
    path: PathBuf,
    timeout: Duration,
}

impl KubeNamespaceLister {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), timeout: DEFAULT_LIST_TIMEOUT }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn client_for(&self, context: &str) -> Result<Client, ListError> {
        let kubeconfig = Kubeconfig::read_from(&self.path).map_err(|e| ListError::ConfigInvalid(e.to_string()))?;
        let opts = KubeConfigOptions { context: Some(context.to_string()), ..Default::default() };
        let mut config = Config::from_custom_kubeconfig(kubeconfig, &opts)
            .await
            .map_err(|e| ListError::ConfigInvalid(e.to_string()))?;
        config.connect_timeout = Some(self.timeout);
        config.read_timeout = Some(self.timeout);
        Client::try_from(config).map_err(|e| ListError::ConfigInvalid(e.to_string()))
    }

    async fn fetch(&self, context: &str) -> Result<Vec<String>, ListError> {
        let client = self.client_for(context).await?;
        let api: Api<Namespace> = Api::all(client);
        let list = match tokio::time::timeout(self.timeout, api.list(&ListParams::default())).await {
            Ok(result) => result.map_err(classify)?,
            Err(_) => return Err(ListError::Unreachable),
        };
        Ok(list.items.into_iter().filter_map(|ns| ns.metadata.name).collect())
    }
}

impl NamespaceLister for KubeNamespaceLister {
    async fn list(&self, context: &str) -> Result<Vec<String>, ListError> {
        tracing::debug!(context, "listing namespaces");
        let result = self.fetch(context).await;
        match &result {
            Ok(namespaces) => tracing::debug!(context, count = namespaces.len(), "listed namespaces"),
            Err(e) => tracing::warn!(context, "namespace listing failed: {}", e.detail()),
        }
        result
    }
}

fn classify(err: kube::Error) -> ListError {
    match err {
        kube::Error::Api(status) => ListError::Api(status.to_string()),
        kube::Error::HyperError(_) | kube::Error::Service(_) => ListError::Unreachable,
        other => ListError::Unknown(other.to_string()),
    }
}
