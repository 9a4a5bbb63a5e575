use crate::error::ApiError;
use crate::models::{MessageResponse, NewUser};
use crate::routes::AppState;
use crate::services::UserStore;
use actix_web::{web, HttpResponse};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/Users", web::get().to(list_users))
        .route("/Users", web::post().to(create_user))
        .route("/Users/{id}", web::get().to(get_user))
        .route("/Users/{id}", web::put().to(update_user))
        .route("/Users/{id}", web::delete().to(delete_user));
}

fn user_not_found() -> ApiError {
    ApiError::NotFound("User not found".to_string())
}

/// GET /Hirely/Users
async fn list_users(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let users = state.store.list_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

/// GET /Hirely/Users/{id}
async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user = state
        .store
        .get_user(&path)
        .await?
        .ok_or_else(user_not_found)?;

    Ok(HttpResponse::Ok().json(user))
}

/// POST /Hirely/Users
///
/// The body is a full user document without `_id`/`createdAt`; the
/// `userType` decides which variant fields are required. Fields belonging to
/// the other user type are rejected with 400, never silently dropped.
async fn create_user(
    state: web::Data<AppState>,
    body: web::Json<NewUser>,
) -> Result<HttpResponse, ApiError> {
    let new_user = body.into_inner();
    new_user.check()?;

    let user = state.store.create_user(new_user.into_user()).await?;

    tracing::info!("Created {} user {}", user.kind.type_name(), user.id);

    Ok(HttpResponse::Created().json(user))
}

/// PUT /Hirely/Users/{id}
///
/// Full-document replace; identity and creation time are kept.
async fn update_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<NewUser>,
) -> Result<HttpResponse, ApiError> {
    let replacement = body.into_inner();
    replacement.check()?;

    let existing = state
        .store
        .get_user(&path)
        .await?
        .ok_or_else(user_not_found)?;

    let updated = state
        .store
        .update_user(replacement.replace(&existing))
        .await?
        .ok_or_else(user_not_found)?;

    tracing::info!("Replaced user {}", updated.id);

    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /Hirely/Users/{id}
async fn delete_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    if !state.store.delete_user(&path).await? {
        return Err(user_not_found());
    }

    tracing::info!("Deleted user {}", path.as_str());

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}
