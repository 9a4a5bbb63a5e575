use crate::error::ApiError;
use crate::models::{MessageResponse, NewJob};
use crate::routes::AppState;
use crate::services::JobStore;
use actix_web::{web, HttpResponse};
use validator::Validate;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/Jobs", web::get().to(list_jobs))
        .route("/Jobs", web::post().to(create_job))
        .route("/Jobs/{id}", web::get().to(get_job))
        .route("/Jobs/{id}", web::put().to(update_job))
        .route("/Jobs/{id}", web::delete().to(delete_job));
}

fn job_not_found() -> ApiError {
    ApiError::NotFound("Job not found".to_string())
}

async fn list_jobs(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let jobs = state.store.list_jobs().await?;
    Ok(HttpResponse::Ok().json(jobs))
}

async fn get_job(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let job = state
        .store
        .get_job(&path)
        .await?
        .ok_or_else(job_not_found)?;

    Ok(HttpResponse::Ok().json(job))
}

/// POST /Hirely/Jobs
///
/// Request body:
/// ```json
/// {
///   "role": "Backend Engineer",
///   "pay": 95000,
///   "location": "45.50,-73.57",
///   "description": "string",
///   "tags": ["Rust", "SQL"]
/// }
/// ```
async fn create_job(
    state: web::Data<AppState>,
    body: web::Json<NewJob>,
) -> Result<HttpResponse, ApiError> {
    let new_job = body.into_inner();
    new_job.validate()?;

    let job = state
        .store
        .create_job(new_job.into_job(uuid::Uuid::new_v4().to_string()))
        .await?;

    tracing::info!("Created job {}", job.id);

    Ok(HttpResponse::Created().json(job))
}

async fn update_job(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<NewJob>,
) -> Result<HttpResponse, ApiError> {
    let replacement = body.into_inner();
    replacement.validate()?;

    let job = state
        .store
        .update_job(replacement.into_job(path.into_inner()))
        .await?
        .ok_or_else(job_not_found)?;

    tracing::info!("Replaced job {}", job.id);

    Ok(HttpResponse::Ok().json(job))
}

async fn delete_job(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    if !state.store.delete_job(&path).await? {
        return Err(job_not_found());
    }

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Job deleted successfully".to_string(),
    }))
}
