use reqwest::Client;
use tokio::runtime::Handle;
use tracing::debug;

use super::registry::{
    CreateEmployeeRequest, CreateEmployeeResponse, EmployeeRegistry, RegistryError,
};
use crate::config::RegistryConfig;

/// HTTP adapter for the registry's `createEmployee` operation.
///
/// The registry contract is synchronous, so calls are driven to completion on the captured
/// runtime handle. Callers must invoke [`EmployeeRegistry::create_employee`] from a thread
/// that is allowed to block, such as one from `tokio::task::spawn_blocking`.
pub struct HttpEmployeeRegistry {
    client: Client,
    endpoint: String,
    runtime: Handle,
}

impl HttpEmployeeRegistry {
    pub fn new(config: &RegistryConfig, runtime: Handle) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| RegistryError::Client(err.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
            runtime,
        })
    }

    /// Build against the runtime the caller is currently running on.
    pub fn with_current_runtime(config: &RegistryConfig) -> Result<Self, RegistryError> {
        let runtime =
            Handle::try_current().map_err(|err| RegistryError::Client(err.to_string()))?;
        Self::new(config, runtime)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(
        &self,
        request: &CreateEmployeeRequest,
    ) -> Result<CreateEmployeeResponse, RegistryError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RegistryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        serde_json::from_slice(&body).map_err(|err| RegistryError::Decode(err.to_string()))
    }
}

impl std::fmt::Debug for HttpEmployeeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpEmployeeRegistry")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl EmployeeRegistry for HttpEmployeeRegistry {
    fn create_employee(
        &self,
        request: &CreateEmployeeRequest,
    ) -> Result<CreateEmployeeResponse, RegistryError> {
        debug!(endpoint = %self.endpoint, "calling employee registry");
        self.runtime.block_on(self.send(request))
    }
}

fn map_transport_error(err: reqwest::Error) -> RegistryError {
    if err.is_timeout() {
        RegistryError::Timeout(err.to_string())
    } else if err.is_decode() {
        RegistryError::Decode(err.to_string())
    } else {
        RegistryError::Transport(err.to_string())
    }
}
