use actix_web::{get, web, HttpRequest, HttpResponse, Responder};

use tradehouse::db;
use tradehouse::models::{AdminUser, BusinessLine};
use tradehouse::services::pagination::PageQuery;

use crate::web::forms::{FaqQuery, MessagesQuery};
use crate::web::helpers::{redirect, render, require_admin_page};
use crate::web::state::AppState;
use crate::web::templates::{
    AdminBannersTemplate, AdminContactsTemplate, AdminFaqsTemplate,
    AdminMessagesTemplate, AdminMilestonesTemplate, AdminNav,
    AdminProductsTemplate, AdminReviewsTemplate, AdminSectionsTemplate,
    AdminStatsTemplate, AdminSubscribersTemplate, AdminTeamTemplate,
    AdminVideosTemplate,
};

async fn nav(state: &AppState, admin: AdminUser, active: &'static str) -> AdminNav {
    let unread = db::count_unread_messages(&state.pool)
        .await
        .unwrap_or_else(|e| {
            log::error!("Could not count unread messages: {}", e);
            0
        });

    AdminNav {
        email: admin.email,
        unread,
        active,
    }
}

fn db_error(e: sqlx::Error) -> HttpResponse {
    log::error!("Admin page query failed: {}", e);
    HttpResponse::InternalServerError()
        .content_type("text/plain; charset=utf-8")
        .body("An internal error occurred")
}

#[get("/admin")]
pub async fn dashboard(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    match require_admin_page(&state.pool, &req).await {
        Ok(_) => redirect("/admin/products"),
        Err(resp) => resp,
    }
}

#[get("/admin/products")]
pub async fn products_tab(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> impl Responder {
    let admin = match require_admin_page(&state.pool, &req).await {
        Ok(admin) => admin,
        Err(resp) => return resp,
    };

    let items = match db::list_products(&state.pool, None).await {
        Ok(items) => items,
        Err(e) => return db_error(e),
    };

    render(AdminProductsTemplate {
        nav: nav(&state, admin, "products").await,
        lines: BusinessLine::ALL,
        items,
    })
}

#[get("/admin/banners")]
pub async fn banners_tab(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let admin = match require_admin_page(&state.pool, &req).await {
        Ok(admin) => admin,
        Err(resp) => return resp,
    };

    let items = match db::list_banners(&state.pool, None, false).await {
        Ok(items) => items,
        Err(e) => return db_error(e),
    };

    render(AdminBannersTemplate {
        nav: nav(&state, admin, "banners").await,
        lines: BusinessLine::ALL,
        items,
    })
}

#[get("/admin/videos")]
pub async fn videos_tab(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let admin = match require_admin_page(&state.pool, &req).await {
        Ok(admin) => admin,
        Err(resp) => return resp,
    };

    let items = match db::list_videos(&state.pool, None).await {
        Ok(items) => items,
        Err(e) => return db_error(e),
    };

    render(AdminVideosTemplate {
        nav: nav(&state, admin, "videos").await,
        lines: BusinessLine::ALL,
        items,
    })
}

#[get("/admin/faqs")]
pub async fn faqs_tab(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<FaqQuery>,
) -> impl Responder {
    let admin = match require_admin_page(&state.pool, &req).await {
        Ok(admin) => admin,
        Err(resp) => return resp,
    };

    let q = query.q.clone().unwrap_or_default();
    let items = match db::list_faqs(&state.pool, None, Some(&q)).await {
        Ok(items) => items,
        Err(e) => return db_error(e),
    };

    render(AdminFaqsTemplate {
        nav: nav(&state, admin, "faqs").await,
        lines: BusinessLine::ALL,
        items,
        query: q,
    })
}

#[get("/admin/reviews")]
pub async fn reviews_tab(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let admin = match require_admin_page(&state.pool, &req).await {
        Ok(admin) => admin,
        Err(resp) => return resp,
    };

    let items = match db::list_reviews(&state.pool, None, false).await {
        Ok(items) => items,
        Err(e) => return db_error(e),
    };

    render(AdminReviewsTemplate {
        nav: nav(&state, admin, "reviews").await,
        lines: BusinessLine::ALL,
        items,
    })
}

#[get("/admin/stats")]
pub async fn stats_tab(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let admin = match require_admin_page(&state.pool, &req).await {
        Ok(admin) => admin,
        Err(resp) => return resp,
    };

    let items = match db::list_stats(&state.pool, None).await {
        Ok(items) => items,
        Err(e) => return db_error(e),
    };

    render(AdminStatsTemplate {
        nav: nav(&state, admin, "stats").await,
        lines: BusinessLine::ALL,
        items,
    })
}

#[get("/admin/team")]
pub async fn team_tab(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let admin = match require_admin_page(&state.pool, &req).await {
        Ok(admin) => admin,
        Err(resp) => return resp,
    };

    let items = match db::list_team_members(&state.pool, None).await {
        Ok(items) => items,
        Err(e) => return db_error(e),
    };

    render(AdminTeamTemplate {
        nav: nav(&state, admin, "team").await,
        lines: BusinessLine::ALL,
        items,
    })
}

#[get("/admin/milestones")]
pub async fn milestones_tab(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> impl Responder {
    let admin = match require_admin_page(&state.pool, &req).await {
        Ok(admin) => admin,
        Err(resp) => return resp,
    };

    let items = match db::list_milestones(&state.pool).await {
        Ok(items) => items,
        Err(e) => return db_error(e),
    };

    render(AdminMilestonesTemplate {
        nav: nav(&state, admin, "milestones").await,
        items,
    })
}

#[get("/admin/sections")]
pub async fn sections_tab(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> impl Responder {
    let admin = match require_admin_page(&state.pool, &req).await {
        Ok(admin) => admin,
        Err(resp) => return resp,
    };

    let items = match db::list_sections(&state.pool, None).await {
        Ok(items) => items,
        Err(e) => return db_error(e),
    };

    render(AdminSectionsTemplate {
        nav: nav(&state, admin, "sections").await,
        lines: BusinessLine::ALL,
        items,
    })
}

#[get("/admin/contacts")]
pub async fn contacts_tab(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> impl Responder {
    let admin = match require_admin_page(&state.pool, &req).await {
        Ok(admin) => admin,
        Err(resp) => return resp,
    };

    let items = match db::list_contacts(&state.pool, None).await {
        Ok(items) => items,
        Err(e) => return db_error(e),
    };

    render(AdminContactsTemplate {
        nav: nav(&state, admin, "contacts").await,
        lines: BusinessLine::ALL,
        items,
    })
}

#[get("/admin/subscribers")]
pub async fn subscribers_tab(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<PageQuery>,
) -> impl Responder {
    let admin = match require_admin_page(&state.pool, &req).await {
        Ok(admin) => admin,
        Err(resp) => return resp,
    };

    let page = match db::list_subscribers(&state.pool, query.page()).await {
        Ok(page) => page,
        Err(e) => return db_error(e),
    };

    render(AdminSubscribersTemplate {
        nav: nav(&state, admin, "subscribers").await,
        page,
    })
}

#[get("/admin/messages")]
pub async fn messages_tab(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<MessagesQuery>,
) -> impl Responder {
    let admin = match require_admin_page(&state.pool, &req).await {
        Ok(admin) => admin,
        Err(resp) => return resp,
    };

    let page_no = query.page_query().page();
    let page = match db::list_messages(&state.pool, page_no, query.unread).await {
        Ok(page) => page,
        Err(e) => return db_error(e),
    };

    render(AdminMessagesTemplate {
        nav: nav(&state, admin, "messages").await,
        page,
        unread_only: query.unread,
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(dashboard)
        .service(products_tab)
        .service(banners_tab)
        .service(videos_tab)
        .service(faqs_tab)
        .service(reviews_tab)
        .service(stats_tab)
        .service(team_tab)
        .service(milestones_tab)
        .service(sections_tab)
        .service(contacts_tab)
        .service(subscribers_tab)
        .service(messages_tab);
}
