use assistant_database::{DocumentEmbedding, DocumentMatch, NewDocumentEmbedding, Vector, EMBEDDING_DIMENSION};
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::response::AppError;
use crate::GlobalState;

pub fn embedding_routes() -> Router<GlobalState> {
    Router::new()
        .route("/api/v1/ml/embedding", post(create_document_embedding))
        .route("/api/v1/ml/embedding/similarity", post(search_vector_similarity))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentEmbeddingRequestDto {
    pub content: String,
    pub metadata: serde_json::Value,
    pub embedding: Vec<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchVectorSimilarityRequestDto {
    pub query_embedding: Vec<f32>,
    pub match_threshold: f64,
    pub limit: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchVectorSimilarityResponseDto {
    pub id: i64,
    pub content: String,
    pub metadata: serde_json::Value,
    pub similarity: f64,
}

fn validate_embedding(name: &str, embedding: &[f32]) -> Result<(), AppError> {
    if embedding.len() != EMBEDDING_DIMENSION {
        return Err(AppError::invalid_input(format!(
            "{} must have {} components, got {}",
            name,
            EMBEDDING_DIMENSION,
            embedding.len()
        )));
    }
    if embedding.iter().any(|value| !value.is_finite()) {
        return Err(AppError::invalid_input(format!("{} must only contain finite numbers", name)));
    }
    Ok(())
}

async fn create_document_embedding(
    State(state): State<GlobalState>,
    Json(documents): Json<Vec<CreateDocumentEmbeddingRequestDto>>,
) -> Result<StatusCode, AppError> {
    for (i, document) in documents.iter().enumerate() {
        validate_embedding(&format!("documents[{i}].embedding"), &document.embedding)?;
        if !document.metadata.is_object() {
            return Err(AppError::invalid_input(format!("documents[{i}].metadata must be an object")));
        }
    }

    let rows: Vec<NewDocumentEmbedding> = documents
        .into_iter()
        .map(|document| NewDocumentEmbedding {
            content: document.content,
            metadata: document.metadata,
            embedding: Vector::from(document.embedding),
        })
        .collect();

    let mut tx = state.db.pool().begin().await?;
    let inserted = DocumentEmbedding::batch_create(rows, &mut *tx).await?;
    tx.commit().await?;

    tracing::info!("[create_document_embedding] Stored {} documents", inserted);
    Ok(StatusCode::CREATED)
}

async fn search_vector_similarity(
    State(state): State<GlobalState>,
    Json(request): Json<SearchVectorSimilarityRequestDto>,
) -> Result<Json<Vec<SearchVectorSimilarityResponseDto>>, AppError> {
    validate_embedding("queryEmbedding", &request.query_embedding)?;
    if request.limit <= 0 {
        return Err(AppError::invalid_input("limit must be positive"));
    }
    if !request.match_threshold.is_finite() {
        return Err(AppError::invalid_input("matchThreshold must be a finite number"));
    }

    let query = Vector::from(request.query_embedding);
    let matches =
        DocumentEmbedding::match_documents(&query, request.match_threshold, request.limit, state.db.pool()).await?;

    Ok(Json(similarity_response(matches)))
}

/// Most similar first.
fn similarity_response(mut matches: Vec<DocumentMatch>) -> Vec<SearchVectorSimilarityResponseDto> {
    matches.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    matches
        .into_iter()
        .map(|m| SearchVectorSimilarityResponseDto {
            id: m.id,
            content: m.content,
            metadata: m.metadata,
            similarity: m.similarity,
        })
        .collect()
}
