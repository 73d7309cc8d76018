use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use log::info;
use uuid::Uuid;

use tradehouse::common::validate_slug;
use tradehouse::db;
use tradehouse::models::{
    ContactInfoCreate, ContactInfoUpdate, MilestoneCreate, MilestoneUpdate, SectionCreate,
    SectionUpdate, StatCreate, StatUpdate, TeamMemberCreate, TeamMemberUpdate,
};

use crate::web::errors::ApiError;
use crate::web::forms::LineQuery;
use crate::web::helpers::{parse_line, require_admin_api};
use crate::web::state::AppState;

type ApiResult = Result<HttpResponse, ApiError>;

// Team members

#[get("/api/team-members")]
pub async fn list_team_members(
    state: web::Data<AppState>,
    query: web::Query<LineQuery>,
) -> ApiResult {
    let line = parse_line(query.business_line.as_deref())?;
    let items = db::list_team_members(&state.pool, line).await?;
    Ok(HttpResponse::Ok().json(items))
}

#[post("/api/team-members")]
pub async fn create_team_member(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<TeamMemberCreate>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let data = body.into_inner().normalized()?;
    let item = db::create_team_member(&state.pool, &data).await?;
    info!("Created team member {}", item.id);
    Ok(HttpResponse::Created().json(item))
}

#[get("/api/team-members/{id}")]
pub async fn get_team_member(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> ApiResult {
    let id = path.into_inner();
    let item = db::get_team_member_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Team member", id))?;
    Ok(HttpResponse::Ok().json(item))
}

#[put("/api/team-members/{id}")]
pub async fn update_team_member(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<TeamMemberUpdate>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let id = path.into_inner();
    let data = body.into_inner().normalized()?;
    let item = db::update_team_member(&state.pool, id, &data)
        .await?
        .ok_or_else(|| ApiError::not_found("Team member", id))?;
    Ok(HttpResponse::Ok().json(item))
}

#[delete("/api/team-members/{id}")]
pub async fn delete_team_member(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let id = path.into_inner();
    if !db::delete_team_member(&state.pool, id).await? {
        return Err(ApiError::not_found("Team member", id));
    }
    info!("Deleted team member {}", id);
    Ok(HttpResponse::NoContent().finish())
}

// Milestones

#[get("/api/milestones")]
pub async fn list_milestones(state: web::Data<AppState>) -> ApiResult {
    let items = db::list_milestones(&state.pool).await?;
    Ok(HttpResponse::Ok().json(items))
}

#[post("/api/milestones")]
pub async fn create_milestone(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<MilestoneCreate>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let data = body.into_inner().normalized()?;
    let item = db::create_milestone(&state.pool, &data).await?;
    info!("Created milestone {}", item.id);
    Ok(HttpResponse::Created().json(item))
}

#[get("/api/milestones/{id}")]
pub async fn get_milestone(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> ApiResult {
    let id = path.into_inner();
    let item = db::get_milestone_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Milestone", id))?;
    Ok(HttpResponse::Ok().json(item))
}

#[put("/api/milestones/{id}")]
pub async fn update_milestone(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<MilestoneUpdate>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let id = path.into_inner();
    let data = body.into_inner().normalized()?;
    let item = db::update_milestone(&state.pool, id, &data)
        .await?
        .ok_or_else(|| ApiError::not_found("Milestone", id))?;
    Ok(HttpResponse::Ok().json(item))
}

#[delete("/api/milestones/{id}")]
pub async fn delete_milestone(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let id = path.into_inner();
    if !db::delete_milestone(&state.pool, id).await? {
        return Err(ApiError::not_found("Milestone", id));
    }
    info!("Deleted milestone {}", id);
    Ok(HttpResponse::NoContent().finish())
}

// Stats

#[get("/api/stats")]
pub async fn list_stats(
    state: web::Data<AppState>,
    query: web::Query<LineQuery>,
) -> ApiResult {
    let line = parse_line(query.business_line.as_deref())?;
    let items = db::list_stats(&state.pool, line).await?;
    Ok(HttpResponse::Ok().json(items))
}

#[post("/api/stats")]
pub async fn create_stat(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<StatCreate>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let data = body.into_inner().normalized()?;
    let item = db::create_stat(&state.pool, &data).await?;
    info!("Created stat {}", item.id);
    Ok(HttpResponse::Created().json(item))
}

#[get("/api/stats/{id}")]
pub async fn get_stat(state: web::Data<AppState>, path: web::Path<Uuid>) -> ApiResult {
    let id = path.into_inner();
    let item = db::get_stat_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Stat", id))?;
    Ok(HttpResponse::Ok().json(item))
}

#[put("/api/stats/{id}")]
pub async fn update_stat(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<StatUpdate>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let id = path.into_inner();
    let data = body.into_inner().normalized()?;
    let item = db::update_stat(&state.pool, id, &data)
        .await?
        .ok_or_else(|| ApiError::not_found("Stat", id))?;
    Ok(HttpResponse::Ok().json(item))
}

#[delete("/api/stats/{id}")]
pub async fn delete_stat(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let id = path.into_inner();
    if !db::delete_stat(&state.pool, id).await? {
        return Err(ApiError::not_found("Stat", id));
    }
    info!("Deleted stat {}", id);
    Ok(HttpResponse::NoContent().finish())
}

// Sections

#[get("/api/sections")]
pub async fn list_sections(
    state: web::Data<AppState>,
    query: web::Query<LineQuery>,
) -> ApiResult {
    let line = parse_line(query.business_line.as_deref())?;
    let items = db::list_sections(&state.pool, line).await?;
    Ok(HttpResponse::Ok().json(items))
}

#[post("/api/sections")]
pub async fn create_section(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<SectionCreate>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let data = body.into_inner().normalized()?;
    let item = db::create_section(&state.pool, &data).await?;
    info!("Created section '{}'", item.slug);
    Ok(HttpResponse::Created().json(item))
}

/// `{key}` is either the section id or its slug.
#[get("/api/sections/{key}")]
pub async fn get_section(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ApiResult {
    let key = path.into_inner();
    let item = match Uuid::parse_str(&key) {
        Ok(id) => db::get_section_by_id(&state.pool, id).await?,
        Err(_) if validate_slug(&key) => {
            db::get_section_by_slug(&state.pool, &key).await?
        }
        Err(_) => None,
    };
    let item = item.ok_or_else(|| ApiError::not_found("Section", &key))?;
    Ok(HttpResponse::Ok().json(item))
}

#[put("/api/sections/{id}")]
pub async fn update_section(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<SectionUpdate>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let id = path.into_inner();
    let data = body.into_inner().normalized()?;
    let item = db::update_section(&state.pool, id, &data)
        .await?
        .ok_or_else(|| ApiError::not_found("Section", id))?;
    Ok(HttpResponse::Ok().json(item))
}

#[delete("/api/sections/{id}")]
pub async fn delete_section(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let id = path.into_inner();
    if !db::delete_section(&state.pool, id).await? {
        return Err(ApiError::not_found("Section", id));
    }
    info!("Deleted section {}", id);
    Ok(HttpResponse::NoContent().finish())
}

// Contacts

#[get("/api/contacts")]
pub async fn list_contacts(
    state: web::Data<AppState>,
    query: web::Query<LineQuery>,
) -> ApiResult {
    let line = parse_line(query.business_line.as_deref())?;
    let items = db::list_contacts(&state.pool, line).await?;
    Ok(HttpResponse::Ok().json(items))
}

#[post("/api/contacts")]
pub async fn create_contact(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<ContactInfoCreate>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let data = body.into_inner().normalized()?;
    let item = db::create_contact(&state.pool, &data).await?;
    info!("Created contact {}", item.id);
    Ok(HttpResponse::Created().json(item))
}

#[get("/api/contacts/{id}")]
pub async fn get_contact(state: web::Data<AppState>, path: web::Path<Uuid>) -> ApiResult {
    let id = path.into_inner();
    let item = db::get_contact_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Contact", id))?;
    Ok(HttpResponse::Ok().json(item))
}

#[put("/api/contacts/{id}")]
pub async fn update_contact(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<ContactInfoUpdate>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let id = path.into_inner();
    let data = body.into_inner().normalized()?;
    let item = db::update_contact(&state.pool, id, &data)
        .await?
        .ok_or_else(|| ApiError::not_found("Contact", id))?;
    Ok(HttpResponse::Ok().json(item))
}

#[delete("/api/contacts/{id}")]
pub async fn delete_contact(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult {
    require_admin_api(&state.pool, &req).await?;
    let id = path.into_inner();
    if !db::delete_contact(&state.pool, id).await? {
        return Err(ApiError::not_found("Contact", id));
    }
    info!("Deleted contact {}", id);
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_team_members)
        .service(create_team_member)
        .service(get_team_member)
        .service(update_team_member)
        .service(delete_team_member)
        .service(list_milestones)
        .service(create_milestone)
        .service(get_milestone)
        .service(update_milestone)
        .service(delete_milestone)
        .service(list_stats)
        .service(create_stat)
        .service(get_stat)
        .service(update_stat)
        .service(delete_stat)
        .service(list_sections)
        .service(create_section)
        .service(get_section)
        .service(update_section)
        .service(delete_section)
        .service(list_contacts)
        .service(create_contact)
        .service(get_contact)
        .service(update_contact)
        .service(delete_contact);
}
