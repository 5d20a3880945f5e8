mod calculator;
mod compound;
mod elements;
mod embedding;
mod math;
mod misc;
mod predict;

pub use calculator::{calculator_routes, CalculatorResp};
pub use compound::compound_routes;
pub use elements::element_routes;
pub use embedding::{
    embedding_routes, CreateDocumentEmbeddingRequestDto, SearchVectorSimilarityRequestDto,
    SearchVectorSimilarityResponseDto,
};
pub use math::{math_routes, CalculatorMatrixResp};
pub use misc::misc_routes;
pub use predict::{
    predict_routes, FoodFeatureDto, FoodPredictRequestDto, FoodPredictResponseDto, StockPredictRequestDto,
    StockPredictResponseDto,
};
