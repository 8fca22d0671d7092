//! Thin adapter around `qdrant-client` to isolate API usage.
//!
//! All Qdrant interactions go through this facade so the rest of the
//! crate never touches the verbose builder API directly.

use crate::config::{DistanceKind, FaqStoreConfig};
use crate::errors::RetrievalError;

use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder, UpsertPointsBuilder,
    Value as QValue, VectorParamsBuilder,
};
use tracing::{debug, info, warn};

/// Facade over the Qdrant client bound to one collection.
pub struct QdrantFacade {
    client: Qdrant,
    collection: String,
    distance: DistanceKind,
}

impl QdrantFacade {
    /// Creates a new facade from the given configuration.
    ///
    /// # Errors
    /// Returns `RetrievalError::Config` on invalid config and
    /// `RetrievalError::Qdrant` if the client cannot be built.
    pub fn new(cfg: &FaqStoreConfig) -> Result<Self, RetrievalError> {
        cfg.validate()?;

        let mut builder = Qdrant::from_url(&cfg.qdrant_url);
        if let Some(key) = &cfg.qdrant_api_key {
            builder = builder.api_key(key.clone());
        }
        let client = builder
            .build()
            .map_err(|e| RetrievalError::Qdrant(e.to_string()))?;

        Ok(Self {
            client,
            collection: cfg.collection.clone(),
            distance: cfg.distance,
        })
    }

    /// Ensures the collection exists with the given dimensionality.
    ///
    /// Existing collection → no-op; missing → created.
    pub async fn ensure_collection(&self, dim: usize) -> Result<(), RetrievalError> {
        info!(
            "ensuring collection '{}' with size={} distance={:?}",
            self.collection, dim, self.distance
        );

        match self.client.collection_info(&self.collection).await {
            Ok(_) => {
                debug!("collection '{}' already exists", self.collection);
                return Ok(());
            }
            Err(err) => {
                warn!(
                    "collection '{}' not found, will be created (error={})",
                    self.collection, err
                );
            }
        }

        let distance = match self.distance {
            DistanceKind::Euclid => Distance::Euclid,
            DistanceKind::Cosine => Distance::Cosine,
            DistanceKind::Dot => Distance::Dot,
        };

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection)
                    .vectors_config(VectorParamsBuilder::new(dim as u64, distance)),
            )
            .await
            .map_err(|e| RetrievalError::Qdrant(e.to_string()))?;

        info!("collection '{}' created", self.collection);
        Ok(())
    }

    /// Upserts a batch of points; returns the count acknowledged.
    pub async fn upsert_points(&self, points: Vec<PointStruct>) -> Result<usize, RetrievalError> {
        if points.is_empty() {
            debug!("no points provided for upsert");
            return Ok(0);
        }

        let count = points.len();
        info!(
            "upserting {} points into collection '{}'",
            count, self.collection
        );

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, points))
            .await
            .map_err(|e| RetrievalError::Qdrant(e.to_string()))?;

        Ok(count)
    }

    /// Similarity search returning `(score, payload)` tuples in the
    /// store's own order (best match first).
    pub async fn search(
        &self,
        vector: Vec<f32>,
        top_k: u64,
    ) -> Result<Vec<(f32, serde_json::Value)>, RetrievalError> {
        debug!(
            "searching '{}' with top_k={}",
            self.collection, top_k
        );

        let builder =
            SearchPointsBuilder::new(&self.collection, vector, top_k).with_payload(true);

        let res = self
            .client
            .search_points(builder)
            .await
            .map_err(|e| RetrievalError::Qdrant(e.to_string()))?;

        let mut out = Vec::with_capacity(res.result.len());
        for r in res.result.into_iter() {
            let score = r.score;
            out.push((score, qpayload_to_json(r.payload)));
        }

        debug!("search completed: {} hits returned", out.len());
        Ok(out)
    }
}

/// Converts a Qdrant payload map into JSON.
///
/// Nested objects/arrays are not used by this collection's payloads
/// and map to `Null`.
fn qpayload_to_json(mut p: std::collections::HashMap<String, QValue>) -> serde_json::Value {
    use qdrant_client::qdrant::value::Kind as K;
    let mut m = serde_json::Map::new();
    for (k, v) in p.drain() {
        let j = match v.kind {
            Some(K::StringValue(s)) => serde_json::Value::String(s),
            Some(K::IntegerValue(i)) => serde_json::Value::Number(i.into()),
            Some(K::DoubleValue(f)) => serde_json::json!(f),
            Some(K::BoolValue(b)) => serde_json::Value::Bool(b),
            _ => serde_json::Value::Null,
        };
        m.insert(k, j);
    }
    serde_json::Value::Object(m)
}
