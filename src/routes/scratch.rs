//! Bare CRUD over a process-local list, addressed by position. No persistence.

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::utils::ErrorResponse;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Example {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Default)]
pub struct ScratchList(Mutex<Vec<Example>>);

#[derive(thiserror::Error, Debug)]
pub enum ScratchError {
    #[error("Example {0} not found")]
    NotFound(usize),
}

impl ResponseError for ScratchError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self))
    }
}

pub async fn list_examples(list: web::Data<ScratchList>) -> HttpResponse {
    let examples = list.0.lock().await;
    HttpResponse::Ok().json(&*examples)
}

pub async fn create_example(
    example: web::Json<Example>,
    list: web::Data<ScratchList>,
) -> HttpResponse {
    let example = example.into_inner();
    list.0.lock().await.push(example.clone());
    HttpResponse::Ok().json(example)
}

pub async fn update_example(
    index: web::Path<usize>,
    example: web::Json<Example>,
    list: web::Data<ScratchList>,
) -> Result<HttpResponse, ScratchError> {
    let index = index.into_inner();
    let example = example.into_inner();
    let mut examples = list.0.lock().await;
    let slot = examples.get_mut(index).ok_or(ScratchError::NotFound(index))?;
    *slot = example.clone();
    Ok(HttpResponse::Ok().json(example))
}

#[derive(Deserialize)]
pub struct DeleteExampleQuery {
    id: usize,
}

pub async fn delete_example(
    query: web::Query<DeleteExampleQuery>,
    list: web::Data<ScratchList>,
) -> Result<HttpResponse, ScratchError> {
    let mut examples = list.0.lock().await;
    if query.id >= examples.len() {
        return Err(ScratchError::NotFound(query.id));
    }
    examples.remove(query.id);
    Ok(HttpResponse::Ok().json(serde_json::json!({"ok": true})))
}
