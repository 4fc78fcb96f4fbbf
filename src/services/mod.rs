pub mod normalize;
pub mod recommender;
pub mod sources;
pub mod vectorizer;

pub use normalize::normalize_title;
pub use recommender::{Recommender, ScoredMovie, RESULT_LIMIT};
pub use vectorizer::{SparseVector, VectorIndex, Vectorizer, VectorizerOptions};
