use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{MovieListing, MovieSummary},
    services::ScoredMovie,
};

use super::AppState;

/// Titles shorter than this are rejected before searching
const MIN_TITLE_CHARS: usize = 3;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub title: String,
}

/// A movie id as clients send it: a JSON number or a numeric string
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MovieIdInput {
    Number(i64),
    Float(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub movie_id: Option<MovieIdInput>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MoviesResponse<T> {
    pub movies: Vec<T>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub movies_loaded: bool,
    pub total_movies: usize,
    pub using_sample_data: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilesResponse {
    pub current_directory: String,
    pub movies_file_exists: bool,
    pub credits_file_exists: bool,
    pub movies_file_path: String,
    pub credits_file_path: String,
}

/// Validates a requested movie id; missing, zero, and blank ids are rejected
pub fn resolve_movie_id(input: Option<MovieIdInput>) -> AppResult<i64> {
    let required = || AppError::InvalidInput("Movie ID is required".to_string());

    match input {
        None | Some(MovieIdInput::Number(0)) => Err(required()),
        Some(MovieIdInput::Number(id)) => Ok(id),
        Some(MovieIdInput::Float(value)) => {
            if value == 0.0 {
                return Err(required());
            }
            if !value.is_finite() || value.fract() != 0.0 || value.abs() > i64::MAX as f64 {
                return Err(AppError::InvalidInput(format!("Movie ID must be an integer: {}", value)));
            }
            Ok(value as i64)
        }
        Some(MovieIdInput::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(required());
            }
            text.parse::<i64>()
                .map_err(|_| AppError::InvalidInput(format!("Movie ID must be an integer: {}", text)))
        }
    }
}

fn summaries(results: &[ScoredMovie<'_>]) -> Vec<MovieSummary> {
    results.iter().map(|r| MovieSummary::from(r.movie)).collect()
}

// Handlers

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let total_movies = state.recommender.catalog().len();

    Json(HealthResponse {
        status: "ok".to_string(),
        movies_loaded: total_movies > 0,
        total_movies,
        using_sample_data: state.origin.is_sample(),
    })
}

/// Search the catalog by title
pub async fn search(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> AppResult<Json<MoviesResponse<MovieSummary>>> {
    let Json(request) = payload?;

    if request.title.chars().count() < MIN_TITLE_CHARS {
        return Err(AppError::InvalidInput("Title too short".to_string()));
    }

    tracing::info!(request_id = %request_id, query = %request.title, "Searching catalog");

    let results = state.recommender.search(&request.title)?;

    tracing::info!(
        request_id = %request_id,
        result_count = results.len(),
        top_score = results.first().map(|r| r.score),
        "Search completed"
    );

    Ok(Json(MoviesResponse {
        movies: summaries(&results),
    }))
}

/// Recommend movies similar to a catalog entry
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> AppResult<Json<MoviesResponse<MovieSummary>>> {
    let Json(request) = payload?;
    let movie_id = resolve_movie_id(request.movie_id)?;

    tracing::info!(request_id = %request_id, movie_id, "Finding recommendations");

    let results = match state.recommender.recommend(movie_id) {
        Ok(results) => results,
        Err(AppError::NotFound(message)) => {
            tracing::warn!(request_id = %request_id, movie_id, "{}", message);
            return Ok(Json(MoviesResponse { movies: Vec::new() }));
        }
        Err(e) => return Err(e),
    };

    tracing::info!(
        request_id = %request_id,
        movie_id,
        result_count = results.len(),
        "Recommendations completed"
    );

    Ok(Json(MoviesResponse {
        movies: summaries(&results),
    }))
}

/// List every movie in the catalog
pub async fn list_movies(State(state): State<AppState>) -> Json<MoviesResponse<MovieListing>> {
    let movies = state
        .recommender
        .catalog()
        .iter()
        .map(MovieListing::from)
        .collect();

    Json(MoviesResponse { movies })
}

/// Report whether the expected CSV exports are present
pub async fn check_files(State(state): State<AppState>) -> AppResult<Json<FilesResponse>> {
    let current_directory = std::env::current_dir()
        .map_err(|e| AppError::Internal(format!("Cannot resolve current directory: {}", e)))?;

    let files = &state.data_files;
    let movies_file_exists = tokio::fs::try_exists(&files.movies_path)
        .await
        .unwrap_or(false);
    let credits_file_exists = tokio::fs::try_exists(&files.credits_path)
        .await
        .unwrap_or(false);

    Ok(Json(FilesResponse {
        current_directory: current_directory.display().to_string(),
        movies_file_exists,
        credits_file_exists,
        movies_file_path: files.movies_path.display().to_string(),
        credits_file_path: files.credits_path.display().to_string(),
    }))
}
