use crate::error::ApiError;
use crate::models::{ChatRequest, ChatResponse, Coordinates, TravelTimeQuery, TravelTimeResponse};
use crate::routes::AppState;
use actix_web::{web, HttpResponse};
use validator::Validate;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/TravelTime", web::get().to(travel_time))
        .route("/Chat", web::post().to(chat));
}

/// Travel time from the user's position to a destination
///
/// GET /Hirely/TravelTime?origin={lat},{lng}&destination={place}&mode={mode}
async fn travel_time(
    state: web::Data<AppState>,
    query: web::Query<TravelTimeQuery>,
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner();

    let (origin, destination) = match (query.origin.as_deref(), query.destination.as_deref()) {
        (Some(o), Some(d)) if !o.trim().is_empty() && !d.trim().is_empty() => (o, d.trim()),
        _ => {
            return Err(ApiError::Validation(
                "Origin and destination are required".to_string(),
            ))
        }
    };

    let origin: Coordinates = origin
        .parse()
        .map_err(|e| ApiError::Validation(format!("Invalid origin: {}", e)))?;

    let mode = query.mode.unwrap_or_default();
    let travel_time = state.maps.travel_time(origin, destination, mode).await?;

    Ok(HttpResponse::Ok().json(TravelTimeResponse { travel_time }))
}

/// One assistant turn
///
/// POST /Hirely/Chat
///
/// Request body:
/// ```json
/// {
///   "systemPrompt": "optional string",
///   "messages": [{ "role": "user|assistant", "content": "string" }],
///   "message": "string"
/// }
/// ```
///
/// Provider failures are answered with the configured fallback reply.
async fn chat(
    state: web::Data<AppState>,
    body: web::Json<ChatRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    request.validate()?;

    let reply = state
        .assistant
        .reply(
            request.system_prompt.as_deref(),
            &request.messages,
            &request.message,
        )
        .await;

    Ok(HttpResponse::Ok().json(ChatResponse { reply }))
}
