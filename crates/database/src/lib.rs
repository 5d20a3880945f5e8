mod document_embedding;
mod env;
mod postgres_connect;
mod sqlx_postgres_traits;

pub use document_embedding::{
    match_documents_function_sql, DocumentEmbedding, DocumentMatch, NewDocumentEmbedding, EMBEDDING_DIMENSION,
};
pub use env::DatabaseEnv;
pub use postgres_connect::{connect, connect_with, db_version, install_schema};
pub use sqlx_postgres_traits::SqlxSchema;

pub use pgvector::Vector;
pub use sqlx::PgPool;
