use anyhow::Result;

/// A process-wide handle to an external resource (database pool, HTTP client)
/// that is connected once at startup and cloned into request handlers.
#[async_trait::async_trait]
pub trait ModuleClient: Clone + Send + Sync + 'static {
    const NAME: &'static str;
    type Client;

    fn validate_env() -> Result<()>;
    async fn setup_connection() -> Result<Self>;

    fn get_client(&self) -> &Self::Client;
}

#[macro_export]
macro_rules! define_module_client {
    {
        (struct $struct_name:ident, $client_name:expr)
        client_type: $client_type:ty,
        env: [ $( $env_var:literal ),* ],
        setup: $setup_logic:expr
    } => {
        #[derive(Clone)]
        pub struct $struct_name {
            client: std::sync::Arc<$client_type>,
        }

        impl $struct_name {
            pub fn from_client(client: $client_type) -> Self {
                Self { client: std::sync::Arc::new(client) }
            }
        }

        #[$crate::__private::async_trait]
        impl $crate::ModuleClient for $struct_name {
            const NAME: &'static str = $client_name;
            type Client = std::sync::Arc<$client_type>;

            fn validate_env() -> $crate::__private::anyhow::Result<()> {
                const ENV_VARS: &'static [&'static str] = &[ $( $env_var ),* ];
                let missing_vars: Vec<&'static str> = ENV_VARS.iter().cloned().filter(|var| std::env::var(var).is_err()).collect();

                if missing_vars.is_empty() {
                    return Ok(());
                }

                let vars_str = missing_vars.join(", ");
                $crate::__private::tracing::error!("[Client: {}] Required environment variables are not set: [{}]", $client_name, &vars_str);
                Err($crate::__private::anyhow::anyhow!(
                    "[Client: {}] Required environment variables are not set: [{}]", $client_name, vars_str
                ))
            }

            async fn setup_connection() -> $crate::__private::anyhow::Result<Self> {
                Self::validate_env()?;

                let client_instance: $crate::__private::anyhow::Result<$client_type> = $setup_logic.await;
                Ok(Self::from_client(client_instance?))
            }

            fn get_client(&self) -> &Self::Client {
                &self.client
            }
        }
    }
}
