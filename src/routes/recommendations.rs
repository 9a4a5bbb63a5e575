use crate::error::ApiError;
use crate::routes::AppState;
use actix_web::{web, HttpResponse};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/RankedJobs/{user_id}", web::get().to(ranked_jobs))
        .route("/NextJobs/{user_id}", web::get().to(next_jobs));
}

/// Every job ordered for the user, best first
///
/// GET /Hirely/RankedJobs/{user_id}
async fn ranked_jobs(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let jobs = state.recommender.ranked_jobs(&path).await?;
    Ok(HttpResponse::Ok().json(jobs))
}

/// The next batch of jobs to swipe on
///
/// GET /Hirely/NextJobs/{user_id}
async fn next_jobs(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let jobs = state.recommender.next_jobs(&path).await?;

    tracing::debug!(
        "Serving {} of at most {} next jobs to {}",
        jobs.len(),
        state.recommender.batch_size(),
        path.as_str()
    );

    Ok(HttpResponse::Ok().json(jobs))
}
