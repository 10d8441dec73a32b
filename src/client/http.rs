//! Remote customer operations over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::error::ClientError;
use crate::config::CUSTOMERS_PATH;
use crate::domain::{Customer, CustomerDraft, DeleteCount};
use crate::errors::ErrorResponse;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client-side view of the customer operations.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CustomerApi: Send + Sync {
    async fn create_customer(&self, draft: CustomerDraft) -> Result<Customer, ClientError>;

    async fn update_customer(&self, id: i32, draft: CustomerDraft)
        -> Result<Customer, ClientError>;

    async fn delete_customer(&self, id: i32) -> Result<u64, ClientError>;

    async fn list_customers(&self) -> Result<Vec<Customer>, ClientError>;

    async fn get_customer(&self, id: i32) -> Result<Option<Customer>, ClientError>;

    async fn find_customer_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Customer>, ClientError>;

    async fn find_customer_by_email(&self, email: &str) -> Result<Option<Customer>, ClientError>;
}

/// `reqwest` implementation talking to the customer routes.
pub struct HttpCustomerClient {
    base_url: String,
    http_client: Client,
    token: Option<String>,
}

impl HttpCustomerClient {
    /// Create a client for the server at `base_url`.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self, ClientError> {
        let http_client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, CUSTOMERS_PATH, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = self.authorize(request).send().await?;
        decode(response).await
    }
}

/// Turn a response into the expected body or the server's error.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let text = response.text().await?;
    let error = match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(body) => ClientError::Api {
            status: status.as_u16(),
            code: body.error.code,
            message: body.error.message,
        },
        Err(_) => ClientError::Api {
            status: status.as_u16(),
            code: "HTTP_ERROR".to_string(),
            message: if text.is_empty() {
                status.to_string()
            } else {
                text
            },
        },
    };

    tracing::debug!(status = status.as_u16(), error = %error, "Customer API call failed");
    Err(error)
}

#[async_trait]
impl CustomerApi for HttpCustomerClient {
    async fn create_customer(&self, draft: CustomerDraft) -> Result<Customer, ClientError> {
        self.send(self.http_client.post(self.url("")).json(&draft))
            .await
    }

    async fn update_customer(
        &self,
        id: i32,
        draft: CustomerDraft,
    ) -> Result<Customer, ClientError> {
        self.send(
            self.http_client
                .put(self.url(&format!("/{}", id)))
                .json(&draft),
        )
        .await
    }

    async fn delete_customer(&self, id: i32) -> Result<u64, ClientError> {
        let deleted: DeleteCount = self
            .send(self.http_client.delete(self.url(&format!("/{}", id))))
            .await?;
        Ok(deleted.count)
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, ClientError> {
        self.send(self.http_client.get(self.url(""))).await
    }

    async fn get_customer(&self, id: i32) -> Result<Option<Customer>, ClientError> {
        self.send(self.http_client.get(self.url(&format!("/{}", id))))
            .await
    }

    async fn find_customer_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Customer>, ClientError> {
        self.send(
            self.http_client
                .get(self.url("/lookup/username"))
                .query(&[("value", username)]),
        )
        .await
    }

    async fn find_customer_by_email(&self, email: &str) -> Result<Option<Customer>, ClientError> {
        self.send(
            self.http_client
                .get(self.url("/lookup/email"))
                .query(&[("value", email)]),
        )
        .await
    }
}
