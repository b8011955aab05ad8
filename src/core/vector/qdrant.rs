//! Qdrant REST adapter.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::core::error::{CopaceticError, Result};
use crate::core::types::IndexEntry;
use crate::core::vector::{check_dimensions, IndexHandle, IndexOptions, VectorIndex};

#[derive(Debug, Serialize)]
struct Point {
    id: String,
    vector: Vec<f32>,
    payload: Map<String, Value>,
}

#[derive(Debug, Serialize)]
struct UpsertPoints {
    points: Vec<Point>,
}

#[derive(Debug, Clone)]
pub struct QdrantIndex {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl QdrantIndex {
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn collection_url(&self, name: &str) -> String {
        format!("{}/collections/{}", self.base_url, name)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("api-key", key),
            None => request,
        }
    }

    fn to_point(handle: &IndexHandle, entry: IndexEntry) -> Point {
        let mut payload: Map<String, Value> = entry.metadata.into_iter().collect();
        payload.insert("content".to_string(), Value::String(entry.content));
        payload.insert(
            "namespace".to_string(),
            Value::String(handle.namespace.clone()),
        );
        Point {
            id: entry.id,
            vector: entry.embedding,
            payload,
        }
    }
}

/// Vector size of an unnamed-vector collection from `GET /collections/{name}`
fn vector_size(info: &Value) -> Option<usize> {
    info.pointer("/result/config/params/vectors/size")
        .and_then(Value::as_u64)
        .map(|size| size as usize)
}

#[async_trait]
impl VectorIndex for QdrantIndex {
    async fn create_index(&self, name: &str, options: &IndexOptions) -> Result<IndexHandle> {
        let url = self.collection_url(name);
        let handle = IndexHandle {
            name: name.to_string(),
            dimension: options.dimension,
            namespace: options.namespace.clone(),
        };

        let existing = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| CopaceticError::IndexCreationFailed(e.to_string()))?;
        if existing.status().is_success() {
            let info: Value = existing
                .json()
                .await
                .map_err(|e| CopaceticError::IndexCreationFailed(e.to_string()))?;
            if let Some(size) = vector_size(&info) {
                if size != options.dimension {
                    return Err(CopaceticError::IndexCreationFailed(format!(
                        "collection {name} has {size} dimensions, embedder produces {}",
                        options.dimension
                    )));
                }
            }
            tracing::debug!("Reusing existing collection {}", name);
            return Ok(handle);
        }

        let response = self
            .authorize(self.client.put(&url))
            .json(&json!({
                "vectors": { "size": options.dimension, "distance": "Cosine" }
            }))
            .send()
            .await
            .map_err(|e| CopaceticError::IndexCreationFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CopaceticError::IndexCreationFailed(format!(
                "{url} returned {status}: {body}"
            )));
        }

        tracing::info!(
            "Created collection {} ({} dimensions)",
            name,
            options.dimension
        );
        Ok(handle)
    }

    async fn upsert(&self, handle: &IndexHandle, entries: Vec<IndexEntry>) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }
        check_dimensions(handle, &entries)?;

        let body = UpsertPoints {
            points: entries
                .into_iter()
                .map(|e| Self::to_point(handle, e))
                .collect(),
        };
        let url = format!("{}/points?wait=true", self.collection_url(&handle.name));

        let response = self
            .authorize(self.client.put(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| CopaceticError::UpsertFailed(e.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(CopaceticError::UpsertFailed(format!(
                "collection {} not found",
                handle.name
            ))),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(CopaceticError::UpsertFailed(format!(
                    "{url} returned {status}: {body}"
                )))
            }
        }
    }
}
