use assistant_common::{define_module_client, ModuleClient};
use sqlx::PgPool;

define_module_client! {
    (struct PostgresClient, "postgres")
    client_type: &'static PgPool,
    env: ["DOCUMENT_EMBEDDING_DB_URL"],
    setup: async {
        assistant_database::connect(false).await
    }
}

impl PostgresClient {
    pub fn pool(&self) -> &'static PgPool {
        **self.get_client()
    }
}
