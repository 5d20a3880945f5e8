mod inference;
mod postgres;

pub use inference::{FoodFeature, InferenceClient, InferenceEndpoint, StockModel};
pub use postgres::PostgresClient;
