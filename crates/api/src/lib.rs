mod env;
mod global_state;
mod response;
mod routes;
mod utils;

pub use routes::{
    calculator_routes, compound_routes, element_routes, embedding_routes, math_routes, misc_routes, predict_routes,
    CalculatorMatrixResp, CalculatorResp, CreateDocumentEmbeddingRequestDto, FoodFeatureDto, FoodPredictRequestDto,
    FoodPredictResponseDto, SearchVectorSimilarityRequestDto, SearchVectorSimilarityResponseDto,
    StockPredictRequestDto, StockPredictResponseDto,
};

pub use env::Settings;
pub use global_state::GlobalState;
pub use response::{AppError, ErrorCode};
pub use utils::{cors_layer, scientific_notation, setup_tracing, LogFormat};
