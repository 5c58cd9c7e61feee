//! HTTP client for network-based API calls

use crate::{CatalogService, ClientConfig, ClientError, ClientResult, OrderService};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::ApiErrorBody;
use shared::models::{Category, Deal, Item, PaymentMethod};
use shared::order::{OrderConfirmation, OrderRequest};

/// HTTP client for making requests to the backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorize(self.client.get(self.url(path)));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a GET request with query parameters
    pub async fn get_with_query<T: DeserializeOwned, Q: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        let request = self.authorize(self.client.get(self.url(path)).query(query));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.authorize(self.client.post(self.url(path)).json(body));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::debug!(%status, body = %text, "request failed");
            let message = ApiErrorBody::parse(&text).and_then(ApiErrorBody::into_message);
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized { message }),
                _ => Err(ClientError::Rejected { status, message }),
            };
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(Into::into)
    }
}

// ========== Catalog API ==========

#[async_trait]
impl CatalogService for HttpClient {
    async fn fetch_categories(&self) -> ClientResult<Vec<Category>> {
        let categories: Vec<Category> = self.get("api/pos/categories").await?;
        Ok(categories.into_iter().filter(|c| c.is_active).collect())
    }

    async fn fetch_items(&self, category: Option<&str>) -> ClientResult<Vec<Item>> {
        match category {
            Some(id) => self.get_with_query("api/pos/items", &[("category", id)]).await,
            None => self.get("api/pos/items").await,
        }
    }

    async fn fetch_deals(&self) -> ClientResult<Vec<Deal>> {
        self.get("api/pos/deals").await
    }

    async fn fetch_payment_methods(&self) -> ClientResult<Vec<PaymentMethod>> {
        let methods: Vec<PaymentMethod> = self.get("api/pos/payment-methods").await?;
        Ok(methods.into_iter().filter(|m| m.is_active).collect())
    }
}

// ========== Order API ==========

#[async_trait]
impl OrderService for HttpClient {
    async fn create_order(&self, request: &OrderRequest) -> ClientResult<OrderConfirmation> {
        tracing::info!(
            items = request.items.len(),
            deals = request.deals.len(),
            payment_method = %request.payment_method,
            "submitting order"
        );
        self.post("api/pos/orders", request).await
    }
}
