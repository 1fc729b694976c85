//! Document store over the backend REST API

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{Document, DocumentStore};
use crate::{ClientConfig, ClientError, ClientResult, HttpClient};
use shared::response::ApiResponse;

/// Store contract implemented against the hosted backend.
///
/// Routes are `store/{collection}` (POST to add, GET to query) and
/// `store/{collection}/{id}` (GET, PUT, PATCH), with one sub-collection
/// level at `store/{collection}/{id}/{child}`.
#[derive(Debug, Clone)]
pub struct RestStore {
    http: HttpClient,
}

#[derive(Debug, Deserialize)]
struct AddedId {
    id: String,
}

impl RestStore {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: HttpClient::new(config),
        }
    }

    /// Reuse an existing HTTP client, sharing its token and timeout.
    pub fn with_http(http: HttpClient) -> Self {
        Self { http }
    }

    fn order_query(order_by: &str, desc: bool) -> Vec<(&'static str, String)> {
        vec![
            ("order_by", order_by.to_string()),
            ("desc", desc.to_string()),
        ]
    }

    fn unwrap_data<T>(envelope: ApiResponse<T>) -> ClientResult<T> {
        envelope
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing response data".to_string()))
    }
}

#[async_trait]
impl DocumentStore for RestStore {
    async fn get(&self, collection: &str, id: &str) -> ClientResult<Option<Document>> {
        let path = format!("store/{collection}/{id}");
        match self.http.get::<ApiResponse<Document>>(&path).await {
            Ok(envelope) => Ok(Some(Self::unwrap_data(envelope)?)),
            Err(ClientError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn put(&self, collection: &str, id: &str, data: Value) -> ClientResult<()> {
        let path = format!("store/{collection}/{id}");
        self.http.put::<ApiResponse<()>, _>(&path, &data).await?;
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, data: Value) -> ClientResult<()> {
        let path = format!("store/{collection}/{id}");
        self.http.patch::<ApiResponse<()>, _>(&path, &data).await?;
        Ok(())
    }

    async fn add(&self, collection: &str, data: Value) -> ClientResult<String> {
        let path = format!("store/{collection}");
        let envelope: ApiResponse<AddedId> = self.http.post(&path, &data).await?;
        Ok(Self::unwrap_data(envelope)?.id)
    }

    async fn query_all(
        &self,
        collection: &str,
        order_by: &str,
        desc: bool,
    ) -> ClientResult<Vec<Document>> {
        let path = format!("store/{collection}");
        let envelope: ApiResponse<Vec<Document>> = self
            .http
            .get_with_query(&path, &Self::order_query(order_by, desc))
            .await?;
        Self::unwrap_data(envelope)
    }

    async fn add_child(
        &self,
        collection: &str,
        parent_id: &str,
        child: &str,
        data: Value,
    ) -> ClientResult<String> {
        let path = format!("store/{collection}/{parent_id}/{child}");
        let envelope: ApiResponse<AddedId> = self.http.post(&path, &data).await?;
        Ok(Self::unwrap_data(envelope)?.id)
    }

    async fn query_children(
        &self,
        collection: &str,
        parent_id: &str,
        child: &str,
        order_by: &str,
        desc: bool,
    ) -> ClientResult<Vec<Document>> {
        let path = format!("store/{collection}/{parent_id}/{child}");
        let envelope: ApiResponse<Vec<Document>> = self
            .http
            .get_with_query(&path, &Self::order_query(order_by, desc))
            .await?;
        Self::unwrap_data(envelope)
    }
}
