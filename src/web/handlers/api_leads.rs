use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use log::info;
use uuid::Uuid;

use tradehouse::db;
use tradehouse::models::{FormMessageCreate, FormMessageUpdate, SubscriberCreate};
use tradehouse::services::pagination::PageQuery;

use crate::web::errors::ApiError;
use crate::web::forms::MessagesQuery;
use crate::web::helpers::{client_ip, require_admin_api};
use crate::web::security::limits;
use crate::web::state::AppState;

type ApiResult = Result<HttpResponse, ApiError>;

// Subscribers

#[post("/api/subscribers")]
pub async fn subscribe(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<SubscriberCreate>,
) -> ApiResult {
    if !state
        .rate_limiter
        .check("subscribe", &client_ip(&req), limits::SUBSCRIBE)
    {
        return Err(ApiError::TooManyRequests);
    }

    let data = body.into_inner().normalized()?;
    let subscriber = db::add_subscriber(&state.pool, &data).await?;
    info!("New subscriber {}", subscriber.id);
    Ok(HttpResponse::Created().json(subscriber))
}

#[get("/api/subscribers")]
pub async fn list_subscribers(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<PageQuery>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let page = db::list_subscribers(&state.pool, query.page()).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[delete("/api/subscribers/{id}")]
pub async fn delete_subscriber(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let id = path.into_inner();
    if !db::delete_subscriber(&state.pool, id).await? {
        return Err(ApiError::not_found("Subscriber", id));
    }
    info!("Deleted subscriber {}", id);
    Ok(HttpResponse::NoContent().finish())
}

// Form messages

#[post("/api/message")]
pub async fn create_message(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<FormMessageCreate>,
) -> ApiResult {
    if !state
        .rate_limiter
        .check("message", &client_ip(&req), limits::MESSAGE)
    {
        return Err(ApiError::TooManyRequests);
    }

    let data = body.into_inner().normalized()?;
    let message = db::create_message(&state.pool, &data).await?;
    info!("New form message {} for {}", message.id, message.business_line);
    Ok(HttpResponse::Created().json(message))
}

#[get("/api/message")]
pub async fn list_messages(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<MessagesQuery>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let page_no = query.page_query().page();
    let page = db::list_messages(&state.pool, page_no, query.unread).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[put("/api/message/{id}")]
pub async fn update_message(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<FormMessageUpdate>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let id = path.into_inner();
    let message = db::mark_message_read(&state.pool, id, body.read)
        .await?
        .ok_or_else(|| ApiError::not_found("Message", id))?;
    Ok(HttpResponse::Ok().json(message))
}

#[delete("/api/message/{id}")]
pub async fn delete_message(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let id = path.into_inner();
    if !db::delete_message(&state.pool, id).await? {
        return Err(ApiError::not_found("Message", id));
    }
    info!("Deleted form message {}", id);
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(subscribe)
        .service(list_subscribers)
        .service(delete_subscriber)
        .service(create_message)
        .service(list_messages)
        .service(update_message)
        .service(delete_message);
}
