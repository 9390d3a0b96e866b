//! Customer provisioning collaborator.
//!
//! Creating a subscription first provisions a customer record in the
//! customer service; the returned identifier is what the aggregate is
//! bound to.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use common::CorrelationId;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Request payload for customer provisioning.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerRequest {
    pub name: String,
    pub email: String,
}

/// A customer record as returned by the customer service.
#[derive(Debug, Clone, Deserialize)]
pub struct ProvisionedCustomer {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Errors that can occur while provisioning a customer.
///
/// Transport failures and remote non-success statuses are distinguished
/// for logging only; both abort the creation workflow identically.
#[derive(Debug, Error)]
pub enum CustomerClientError {
    /// The request never completed (connect, timeout, decode).
    #[error("Customer service transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The customer service answered with a non-success status.
    #[error("Customer service returned status code {0}")]
    RemoteStatus(StatusCode),
}

/// Trait for customer provisioning operations.
#[async_trait]
pub trait CustomerProvisioning: Send + Sync {
    /// Provisions a customer, returning its durable identifier.
    async fn create_customer(
        &self,
        request: &CustomerRequest,
        correlation_id: &CorrelationId,
    ) -> Result<ProvisionedCustomer, CustomerClientError>;
}

/// HTTP customer client configuration.
#[derive(Debug, Clone)]
pub struct HttpCustomerClientConfig {
    /// Customer service base URL.
    pub base_url: String,
    /// Connect timeout.
    pub connect_timeout: Duration,
    /// Request timeout.
    pub request_timeout: Duration,
}

impl Default for HttpCustomerClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8081/customers".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Customer provisioning over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCustomerClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpCustomerClient {
    /// Creates a new HTTP customer client.
    pub fn new(config: HttpCustomerClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: config.base_url,
            client,
        }
    }
}

#[async_trait]
impl CustomerProvisioning for HttpCustomerClient {
    #[tracing::instrument(skip(self, request), fields(customer_email = %request.email))]
    async fn create_customer(
        &self,
        request: &CustomerRequest,
        correlation_id: &CorrelationId,
    ) -> Result<ProvisionedCustomer, CustomerClientError> {
        let response = self
            .client
            .post(&self.base_url)
            .header("X-Correlation-ID", correlation_id.as_str())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::CREATED && status != StatusCode::OK {
            return Err(CustomerClientError::RemoteStatus(status));
        }

        let customer: ProvisionedCustomer = response.json().await?;
        tracing::debug!(customer_id = %customer.id, "customer provisioned");
        Ok(customer)
    }
}

#[derive(Debug, Default)]
struct InMemoryCustomerState {
    customers: HashMap<String, ProvisionedCustomer>,
    next_id: u32,
    create_calls: usize,
    fail_with_status: Option<u16>,
}

/// In-memory customer provisioning for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomerService {
    state: Arc<RwLock<InMemoryCustomerState>>,
}

impl InMemoryCustomerService {
    /// Creates a new in-memory customer service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the service to report a non-success status on the next call.
    pub fn set_fail_with_status(&self, status: Option<u16>) {
        self.state.write().unwrap().fail_with_status = status;
    }

    /// Returns how many times `create_customer` was invoked.
    pub fn create_calls(&self) -> usize {
        self.state.read().unwrap().create_calls
    }

    /// Returns the number of provisioned customers.
    pub fn customer_count(&self) -> usize {
        self.state.read().unwrap().customers.len()
    }
}

#[async_trait]
impl CustomerProvisioning for InMemoryCustomerService {
    async fn create_customer(
        &self,
        request: &CustomerRequest,
        _correlation_id: &CorrelationId,
    ) -> Result<ProvisionedCustomer, CustomerClientError> {
        let mut state = self.state.write().unwrap();
        state.create_calls += 1;

        if let Some(status) = state.fail_with_status {
            return Err(CustomerClientError::RemoteStatus(
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ));
        }

        state.next_id += 1;
        let customer = ProvisionedCustomer {
            id: format!("cust-{:04}", state.next_id),
            name: request.name.clone(),
            email: request.email.clone(),
        };
        state
            .customers
            .insert(customer.id.clone(), customer.clone());

        Ok(customer)
    }
}
