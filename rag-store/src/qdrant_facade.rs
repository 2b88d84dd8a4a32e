//! Thin adapter around `qdrant-client` to isolate API usage.
//!
//! All Qdrant interactions sit behind this minimal API so the rest of the
//! crate never touches the client's builder types.

use std::collections::HashMap;

use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, SearchParamsBuilder, SearchPointsBuilder, Value as QValue,
    VectorParamsBuilder, value::Kind as K,
};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::config::RagConfig;
use crate::errors::RagError;

pub struct QdrantFacade {
    client: Qdrant,
    collection: String,
}

impl QdrantFacade {
    /// Creates a new facade from the given configuration.
    ///
    /// The client connects lazily, so this fails only on bad configuration.
    pub fn new(cfg: &RagConfig) -> Result<Self, RagError> {
        cfg.validate()?;

        let mut builder = Qdrant::from_url(&cfg.qdrant_url);
        if let Some(key) = &cfg.qdrant_api_key {
            builder = builder.api_key(key.clone());
        }
        let client = builder
            .build()
            .map_err(|e| RagError::Qdrant(e.to_string()))?;

        Ok(Self {
            client,
            collection: cfg.collection.clone(),
        })
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Creates the collection (cosine, `dim`) unless it already exists.
    pub async fn ensure_collection(&self, dim: usize) -> Result<(), RagError> {
        info!(collection = %self.collection, dim, "ensuring collection");

        match self.client.collection_info(&self.collection).await {
            Ok(_) => {
                debug!(collection = %self.collection, "collection already exists");
                return Ok(());
            }
            Err(err) => {
                warn!(collection = %self.collection, error = %err, "collection not found, creating");
            }
        }

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection)
                    .vectors_config(VectorParamsBuilder::new(dim as u64, Distance::Cosine)),
            )
            .await
            .map_err(|e| RagError::Qdrant(e.to_string()))?;

        info!(collection = %self.collection, "collection created");
        Ok(())
    }

    /// Similarity search returning `(score, payload)` tuples sorted by score.
    pub async fn search(
        &self,
        vector: Vec<f32>,
        top_k: u64,
        with_payload: bool,
        exact: bool,
    ) -> Result<Vec<(f32, Value)>, RagError> {
        debug!(
            collection = %self.collection,
            top_k, with_payload, exact, "searching"
        );

        let mut builder =
            SearchPointsBuilder::new(&self.collection, vector, top_k).with_payload(with_payload);
        if exact {
            builder = builder.params(SearchParamsBuilder::default().exact(true));
        }

        let res = self
            .client
            .search_points(builder)
            .await
            .map_err(|e| RagError::Qdrant(e.to_string()))?;

        let out: Vec<_> = res
            .result
            .into_iter()
            .map(|r| (r.score, qpayload_to_json(r.payload)))
            .collect();

        debug!(hits = out.len(), "search completed");
        Ok(out)
    }
}

/// Converts a Qdrant payload (`HashMap<String, qdrant::Value>`) into a JSON object.
pub(crate) fn qpayload_to_json(p: HashMap<String, QValue>) -> Value {
    Value::Object(p.into_iter().map(|(k, v)| (k, qvalue_to_json(v))).collect())
}

fn qvalue_to_json(v: QValue) -> Value {
    match v.kind {
        Some(K::StringValue(s)) => Value::String(s),
        Some(K::IntegerValue(i)) => Value::Number(i.into()),
        Some(K::DoubleValue(f)) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Some(K::BoolValue(b)) => Value::Bool(b),
        Some(K::ListValue(list)) => {
            Value::Array(list.values.into_iter().map(qvalue_to_json).collect())
        }
        Some(K::StructValue(s)) => Value::Object(
            s.fields
                .into_iter()
                .map(|(k, v)| (k, qvalue_to_json(v)))
                .collect::<Map<_, _>>(),
        ),
        Some(K::NullValue(_)) | None => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn s(v: &str) -> QValue {
        QValue {
            kind: Some(K::StringValue(v.to_string())),
        }
    }

    #[test]
    fn converts_scalar_payload_fields() {
        let mut p = HashMap::new();
        p.insert("text".to_string(), s("Section 8"));
        p.insert("url".to_string(), s("https://indiankanoon.org/doc/1/"));
        p.insert(
            "year".to_string(),
            QValue {
                kind: Some(K::IntegerValue(1956)),
            },
        );
        p.insert("missing".to_string(), QValue { kind: None });

        assert_eq!(
            qpayload_to_json(p),
            json!({
                "text": "Section 8",
                "url": "https://indiankanoon.org/doc/1/",
                "year": 1956,
                "missing": null
            })
        );
    }

    #[test]
    fn converts_nested_lists() {
        let list = QValue {
            kind: Some(K::ListValue(qdrant_client::qdrant::ListValue {
                values: vec![s("a"), s("b")],
            })),
        };
        let mut p = HashMap::new();
        p.insert("tags".to_string(), list);
        assert_eq!(qpayload_to_json(p), json!({ "tags": ["a", "b"] }));
    }

    #[test]
    fn new_rejects_invalid_config() {
        let cfg = RagConfig::new_default("", "kaanoon");
        assert!(matches!(QdrantFacade::new(&cfg), Err(RagError::Config(_))));
    }
}
