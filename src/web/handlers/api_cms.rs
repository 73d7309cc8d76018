use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use log::info;
use uuid::Uuid;

use tradehouse::db;
use tradehouse::models::{
    BannerCreate, BannerUpdate, FaqCreate, FaqUpdate, ProductCreate,
    ProductUpdate, ReviewCreate, ReviewUpdate, VideoCreate, VideoOrder,
    VideoUpdate,
};

use crate::web::errors::ApiError;
use crate::web::forms::{FaqQuery, LineQuery, ListQuery};
use crate::web::helpers::{current_admin, parse_line, require_admin_api};
use crate::web::state::AppState;

type ApiResult = Result<HttpResponse, ApiError>;

#[get("/api/cms")]
pub async fn cms_bundle(
    state: web::Data<AppState>,
    query: web::Query<LineQuery>,
) -> ApiResult {
    let line = parse_line(query.business_line.as_deref())?;
    let bundle = db::cms_bundle(&state.pool, line).await?;
    Ok(HttpResponse::Ok().json(bundle))
}

// Products

#[get("/api/cms/products")]
pub async fn list_products(
    state: web::Data<AppState>,
    query: web::Query<LineQuery>,
) -> ApiResult {
    let line = parse_line(query.business_line.as_deref())?;
    let items = db::list_products(&state.pool, line).await?;
    Ok(HttpResponse::Ok().json(items))
}

#[post("/api/cms/products")]
pub async fn create_product(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<ProductCreate>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let data = body.into_inner().normalized()?;
    let item = db::create_product(&state.pool, &data).await?;
    info!("Created product {}", item.id);
    Ok(HttpResponse::Created().json(item))
}

#[get("/api/cms/products/{id}")]
pub async fn get_product(state: web::Data<AppState>, path: web::Path<Uuid>) -> ApiResult {
    let id = path.into_inner();
    let item = db::get_product_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", id))?;
    Ok(HttpResponse::Ok().json(item))
}

#[put("/api/cms/products/{id}")]
pub async fn update_product(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<ProductUpdate>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let id = path.into_inner();
    let data = body.into_inner().normalized()?;
    let item = db::update_product(&state.pool, id, &data)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", id))?;
    Ok(HttpResponse::Ok().json(item))
}

#[delete("/api/cms/products/{id}")]
pub async fn delete_product(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let id = path.into_inner();
    if !db::delete_product(&state.pool, id).await? {
        return Err(ApiError::not_found("Product", id));
    }
    info!("Deleted product {}", id);
    Ok(HttpResponse::NoContent().finish())
}

// Banners

/// Inactive banners are listed only for a signed-in admin asking for them.
#[get("/api/cms/banners")]
pub async fn list_banners(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<ListQuery>,
) -> ApiResult {
    let line = parse_line(query.business_line.as_deref())?;
    let include_inactive =
        query.include_inactive && current_admin(&state.pool, &req).await?.is_some();
    let items = db::list_banners(&state.pool, line, !include_inactive).await?;
    Ok(HttpResponse::Ok().json(items))
}

#[post("/api/cms/banners")]
pub async fn create_banner(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<BannerCreate>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let data = body.into_inner().normalized()?;
    let item = db::create_banner(&state.pool, &data).await?;
    info!("Created banner {}", item.id);
    Ok(HttpResponse::Created().json(item))
}

/// An inactive banner is visible to admins only; others get a 404.
#[get("/api/cms/banners/{id}")]
pub async fn get_banner(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult {
    let id = path.into_inner();
    let item = db::get_banner_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Banner", id))?;
    if !item.active && current_admin(&state.pool, &req).await?.is_none() {
        return Err(ApiError::not_found("Banner", id));
    }
    Ok(HttpResponse::Ok().json(item))
}

#[put("/api/cms/banners/{id}")]
pub async fn update_banner(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<BannerUpdate>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let id = path.into_inner();
    let data = body.into_inner().normalized()?;
    let item = db::update_banner(&state.pool, id, &data)
        .await?
        .ok_or_else(|| ApiError::not_found("Banner", id))?;
    Ok(HttpResponse::Ok().json(item))
}

#[delete("/api/cms/banners/{id}")]
pub async fn delete_banner(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let id = path.into_inner();
    if !db::delete_banner(&state.pool, id).await? {
        return Err(ApiError::not_found("Banner", id));
    }
    info!("Deleted banner {}", id);
    Ok(HttpResponse::NoContent().finish())
}

// Videos

#[get("/api/cms/videos")]
pub async fn list_videos(
    state: web::Data<AppState>,
    query: web::Query<LineQuery>,
) -> ApiResult {
    let line = parse_line(query.business_line.as_deref())?;
    let items = db::list_videos(&state.pool, line).await?;
    Ok(HttpResponse::Ok().json(items))
}

#[post("/api/cms/videos")]
pub async fn create_video(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<VideoCreate>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let data = body.into_inner().normalized()?;
    let item = db::create_video(&state.pool, &data).await?;
    info!("Created video {}", item.id);
    Ok(HttpResponse::Created().json(item))
}

/// Registered ahead of `/api/cms/videos/{id}` so `order` is not read as an id.
#[put("/api/cms/videos/order")]
pub async fn reorder_videos(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<VideoOrder>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let order = body.into_inner();
    order.validate()?;
    let items = db::reorder_videos(&state.pool, &order.ids).await?;
    info!("Reordered {} videos", items.len());
    Ok(HttpResponse::Ok().json(items))
}

#[get("/api/cms/videos/{id}")]
pub async fn get_video(state: web::Data<AppState>, path: web::Path<Uuid>) -> ApiResult {
    let id = path.into_inner();
    let item = db::get_video_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Video", id))?;
    Ok(HttpResponse::Ok().json(item))
}

#[put("/api/cms/videos/{id}")]
pub async fn update_video(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<VideoUpdate>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let id = path.into_inner();
    let data = body.into_inner().normalized()?;
    let item = db::update_video(&state.pool, id, &data)
        .await?
        .ok_or_else(|| ApiError::not_found("Video", id))?;
    Ok(HttpResponse::Ok().json(item))
}

#[delete("/api/cms/videos/{id}")]
pub async fn delete_video(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let id = path.into_inner();
    if !db::delete_video(&state.pool, id).await? {
        return Err(ApiError::not_found("Video", id));
    }
    info!("Deleted video {}", id);
    Ok(HttpResponse::NoContent().finish())
}

// FAQs

#[get("/api/cms/faqs")]
pub async fn list_faqs(
    state: web::Data<AppState>,
    query: web::Query<FaqQuery>,
) -> ApiResult {
    let line = parse_line(query.business_line.as_deref())?;
    let items = db::list_faqs(&state.pool, line, query.q.as_deref()).await?;
    Ok(HttpResponse::Ok().json(items))
}

#[post("/api/cms/faqs")]
pub async fn create_faq(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<FaqCreate>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let data = body.into_inner().normalized()?;
    let item = db::create_faq(&state.pool, &data).await?;
    info!("Created FAQ {}", item.id);
    Ok(HttpResponse::Created().json(item))
}

#[get("/api/cms/faqs/{id}")]
pub async fn get_faq(state: web::Data<AppState>, path: web::Path<Uuid>) -> ApiResult {
    let id = path.into_inner();
    let item = db::get_faq_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("FAQ", id))?;
    Ok(HttpResponse::Ok().json(item))
}

#[put("/api/cms/faqs/{id}")]
pub async fn update_faq(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<FaqUpdate>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let id = path.into_inner();
    let data = body.into_inner().normalized()?;
    let item = db::update_faq(&state.pool, id, &data)
        .await?
        .ok_or_else(|| ApiError::not_found("FAQ", id))?;
    Ok(HttpResponse::Ok().json(item))
}

#[delete("/api/cms/faqs/{id}")]
pub async fn delete_faq(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let id = path.into_inner();
    if !db::delete_faq(&state.pool, id).await? {
        return Err(ApiError::not_found("FAQ", id));
    }
    info!("Deleted FAQ {}", id);
    Ok(HttpResponse::NoContent().finish())
}

// Reviews

/// Unpublished reviews are listed only for a signed-in admin asking for them.
#[get("/api/cms/reviews")]
pub async fn list_reviews(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<ListQuery>,
) -> ApiResult {
    let line = parse_line(query.business_line.as_deref())?;
    let include_unpublished =
        query.include_unpublished && current_admin(&state.pool, &req).await?.is_some();
    let items = db::list_reviews(&state.pool, line, !include_unpublished).await?;
    Ok(HttpResponse::Ok().json(items))
}

#[post("/api/cms/reviews")]
pub async fn create_review(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<ReviewCreate>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let data = body.into_inner().normalized()?;
    let item = db::create_review(&state.pool, &data).await?;
    info!("Created review {}", item.id);
    Ok(HttpResponse::Created().json(item))
}

/// Unpublished reviews are hidden from anonymous callers like an unknown id.
#[get("/api/cms/reviews/{id}")]
pub async fn get_review(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult {
    let id = path.into_inner();
    let item = db::get_review_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Review", id))?;
    if !item.published && current_admin(&state.pool, &req).await?.is_none() {
        return Err(ApiError::not_found("Review", id));
    }
    Ok(HttpResponse::Ok().json(item))
}

#[put("/api/cms/reviews/{id}")]
pub async fn update_review(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<ReviewUpdate>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let id = path.into_inner();
    let data = body.into_inner().normalized()?;
    let item = db::update_review(&state.pool, id, &data)
        .await?
        .ok_or_else(|| ApiError::not_found("Review", id))?;
    Ok(HttpResponse::Ok().json(item))
}

#[delete("/api/cms/reviews/{id}")]
pub async fn delete_review(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let id = path.into_inner();
    if !db::delete_review(&state.pool, id).await? {
        return Err(ApiError::not_found("Review", id));
    }
    info!("Deleted review {}", id);
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(cms_bundle)
        .service(list_products)
        .service(create_product)
        .service(get_product)
        .service(update_product)
        .service(delete_product)
        .service(list_banners)
        .service(create_banner)
        .service(get_banner)
        .service(update_banner)
        .service(delete_banner)
        .service(list_videos)
        .service(create_video)
        .service(reorder_videos)
        .service(get_video)
        .service(update_video)
        .service(delete_video)
        .service(list_faqs)
        .service(create_faq)
        .service(get_faq)
        .service(update_faq)
        .service(delete_faq)
        .service(list_reviews)
        .service(create_review)
        .service(get_review)
        .service(update_review)
        .service(delete_review);
}
