use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Which table an ID was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    /// The two partitioned product tables behind `/similar`.
    Partitions,
    /// Cart catalog keyed by product `id`.
    Cart,
    /// Feature table keyed by `variant_id`.
    Wishlist,
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CatalogKind::Partitions => "partitions",
            CatalogKind::Cart => "cart",
            CatalogKind::Wishlist => "wishlist",
        };
        f.write_str(name)
    }
}

/// Raised by the similarity lookup when an ID is absent from its catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("{}", not_found_message(.catalog, .id))]
    NotFound { catalog: CatalogKind, id: i64 },
}

fn not_found_message(catalog: &CatalogKind, id: &i64) -> String {
    match catalog {
        CatalogKind::Partitions => "Product not found".to_string(),
        CatalogKind::Cart => format!("{} is not in the product database.", id),
        CatalogKind::Wishlist => {
            format!("Product with variant ID {} not found in the database.", id)
        }
    }
}

impl LookupError {
    pub fn not_found(catalog: CatalogKind, id: i64) -> Self {
        LookupError::NotFound { catalog, id }
    }
}

/// Failures while loading and checking the precomputed artifacts.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{name}: row {row} has {actual} columns, expected {expected}")]
    RaggedMatrix {
        name: String,
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("{name}: shape mismatch: {detail}")]
    ShapeMismatch { name: String, detail: String },

    #[error("{name}: duplicate id {id}")]
    DuplicateId { name: String, id: i64 },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let code = self.status_code();
        let message = match self {
            AppError::Validation(msg) => msg.clone(),
        };

        HttpResponse::build(code).json(ErrorResponse {
            error: message,
            code: code.as_u16(),
        })
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

// A seed that the caller asked us to surface is a bad request, not a missing route.
impl From<LookupError> for AppError {
    fn from(err: LookupError) -> Self {
        AppError::Validation(err.to_string())
    }
}
