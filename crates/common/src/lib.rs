mod client;
mod env;

pub use client::ModuleClient;
pub use env::{env_or, load_profile_env, profile, EnvVars, DEFAULT_PROFILE};

#[doc(hidden)]
pub mod __private {
    pub use anyhow;
    pub use async_trait::async_trait;
    pub use tracing;
}
