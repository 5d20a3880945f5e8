use pgvector::Vector;
use serde::{Deserialize, Serialize};
use sqlx::{Acquire, FromRow, PgConnection, Postgres, QueryBuilder};

use crate::SqlxSchema;

/// Length of every stored embedding.
pub const EMBEDDING_DIMENSION: usize = 1536;

/// Postgres accepts at most 65535 bind parameters per statement.
const BIND_LIMIT: usize = 65535;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DocumentEmbedding {
    pub id: i64,
    pub content: String,
    pub metadata: serde_json::Value,
    pub embedding: Vector,
}

/// A row to insert; the id comes from `document_embedding_id_seq`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocumentEmbedding {
    pub content: String,
    pub metadata: serde_json::Value,
    pub embedding: Vector,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct DocumentMatch {
    pub id: i64,
    pub content: String,
    pub metadata: serde_json::Value,
    pub similarity: f64,
}

impl SqlxSchema for DocumentEmbedding {
    const TABLE_NAME: &'static str = "document_embedding";
    const ID_COLUMN_NAME: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &["id", "content", "metadata", "embedding"];
    const INDEXES_SQL: &'static [&'static str] = &[
        "CREATE INDEX IF NOT EXISTS document_embedding_hnsw_idx ON document_embedding USING hnsw (embedding vector_cosine_ops)",
    ];

    fn create_table_sql() -> Vec<String> {
        vec![
            "CREATE SEQUENCE IF NOT EXISTS document_embedding_id_seq START 1".to_string(),
            format!(
                r#"CREATE TABLE IF NOT EXISTS document_embedding (
                    id BIGINT PRIMARY KEY NOT NULL DEFAULT nextval('document_embedding_id_seq'),
                    content TEXT NOT NULL,
                    metadata JSONB NOT NULL DEFAULT '{{}}'::jsonb,
                    embedding vector({EMBEDDING_DIMENSION}) NOT NULL
                )"#
            ),
            "ALTER SEQUENCE document_embedding_id_seq OWNED BY document_embedding.id".to_string(),
            match_documents_function_sql(),
        ]
    }
}

/// `match_documents(query_embedding, match_threshold, match_count)`: rows whose
/// cosine similarity to the query is above the threshold, closest first.
pub fn match_documents_function_sql() -> String {
    format!(
        r#"CREATE OR REPLACE FUNCTION match_documents (
            query_embedding vector({EMBEDDING_DIMENSION}),
            match_threshold float,
            match_count int
        )
        RETURNS TABLE (id bigint, content text, metadata jsonb, similarity float)
        LANGUAGE sql STABLE
        AS $$
            SELECT
                document_embedding.id,
                document_embedding.content,
                document_embedding.metadata,
                1 - (document_embedding.embedding <=> query_embedding) AS similarity
            FROM document_embedding
            WHERE 1 - (document_embedding.embedding <=> query_embedding) > match_threshold
            ORDER BY document_embedding.embedding <=> query_embedding
            LIMIT match_count;
        $$"#
    )
}

impl DocumentEmbedding {
    /// Inserts `rows` with multi-row INSERT statements on the caller's
    /// connection or transaction. Returns the number of inserted rows.
    pub async fn batch_create(rows: Vec<NewDocumentEmbedding>, conn: &mut PgConnection) -> Result<u64, sqlx::Error> {
        if rows.is_empty() {
            return Ok(0);
        }

        let rows_per_statement = BIND_LIMIT / Self::insert_columns().len();
        let mut inserted = 0;

        let mut rows = rows.into_iter().peekable();
        while rows.peek().is_some() {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(Self::insert_prefix_sql());
            builder.push_values(rows.by_ref().take(rows_per_statement), |mut b, row| {
                b.push_bind(row.content).push_bind(row.metadata).push_bind(row.embedding);
            });
            inserted += builder.build().execute(&mut *conn).await?.rows_affected();
        }

        tracing::debug!("[DocumentEmbedding::batch_create] Inserted {} rows", inserted);
        Ok(inserted)
    }

    /// Calls the database-side `match_documents` function.
    pub async fn match_documents<'e, A>(
        query_embedding: &Vector,
        match_threshold: f64,
        limit: i32,
        acquirer: A,
    ) -> Result<Vec<DocumentMatch>, sqlx::Error>
    where
        A: Acquire<'e, Database = Postgres> + Send,
    {
        let mut conn = acquirer.acquire().await?;
        sqlx::query_as::<_, DocumentMatch>(
            "SELECT id, content, metadata, similarity FROM match_documents($1::vector, $2, $3)",
        )
        .bind(query_embedding.clone())
        .bind(match_threshold)
        .bind(limit)
        .fetch_all(&mut *conn)
        .await
    }

    pub async fn find_all<'e, A>(acquirer: A) -> Result<Vec<Self>, sqlx::Error>
    where
        A: Acquire<'e, Database = Postgres> + Send,
    {
        let mut conn = acquirer.acquire().await?;
        sqlx::query_as::<_, Self>(&Self::select_all_sql()).fetch_all(&mut *conn).await
    }
}
