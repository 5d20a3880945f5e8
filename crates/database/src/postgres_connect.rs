use anyhow::{anyhow, Context, Result};
use assistant_common::EnvVars;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::OnceCell;

use crate::{DatabaseEnv, DocumentEmbedding, SqlxSchema};

static POOL: OnceCell<PgPool> = OnceCell::const_new();

/// Process-wide pool for the document embedding database, connected on first
/// use from `DOCUMENT_EMBEDDING_DB_URL`. With `create_tables` the first call
/// also installs the schema.
pub async fn connect(create_tables: bool) -> Result<&'static PgPool> {
    POOL.get_or_try_init(|| async {
        let env = DatabaseEnv::load();
        let database_url = env
            .document_embedding_db_url
            .ok_or_else(|| anyhow!("{} environment variable not set", DatabaseEnv::DB_URL_KEY))?;
        connect_with(&database_url, env.max_connections, create_tables).await
    })
    .await
}

/// Opens a new pool, enables the `vector` extension and optionally creates
/// the tables.
pub async fn connect_with(database_url: &str, max_connections: u32, create_tables: bool) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .context("Failed to connect to document embedding database")?;

    sqlx::query("CREATE EXTENSION IF NOT EXISTS vector")
        .execute(&pool)
        .await
        .context("Failed to create vector extension")?;

    if create_tables {
        install_schema::<DocumentEmbedding>(&pool).await?;
    }

    Ok(pool)
}

/// Runs the create statements and indexes of `T`.
pub async fn install_schema<T: SqlxSchema>(pool: &PgPool) -> Result<()> {
    for statement in T::create_table_sql() {
        sqlx::query(&statement)
            .execute(pool)
            .await
            .with_context(|| format!("Failed to create schema for '{}'. SQL: {}", T::table_name(), statement))?;
    }

    for index_sql in T::INDEXES_SQL {
        sqlx::query(index_sql)
            .execute(pool)
            .await
            .with_context(|| format!("Failed to create index for '{}'. SQL: {}", T::table_name(), index_sql))?;
    }

    tracing::info!("[install_schema] Schema for '{}' is ready", T::table_name());
    Ok(())
}

pub async fn db_version(pool: &PgPool) -> Result<String> {
    let (version,): (String,) = sqlx::query_as("select version()").fetch_one(pool).await?;
    tracing::info!("[db_version] {}", version);
    Ok(version)
}
