use anyhow::Result;

use assistant_common::load_profile_env;
use assistant_database::{connect, db_version};
use assistant_service_api::setup_tracing;

/// Creates the `vector` extension, the document embedding table and the
/// `match_documents` function.
#[tokio::main]
async fn main() -> Result<()> {
    load_profile_env("config");
    setup_tracing();

    let pool = connect(true).await?;
    db_version(pool).await?;
    tracing::info!("[init_db] Database is ready");
    Ok(())
}
