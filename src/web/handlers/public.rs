use actix_web::http::StatusCode;
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use serde_json::json;

use tradehouse::common::ResourceError;
use tradehouse::db;
use tradehouse::models::{BusinessLine, CmsBundle, FormMessageCreate, SubscriberCreate};
use tradehouse::services::media;

use crate::web::forms::{ContactForm, SubscribeForm};
use crate::web::helpers::{client_ip, render, render_with_status};
use crate::web::security::{generic_error_message, limits};
use crate::web::state::AppState;
use crate::web::templates::{
    AboutTemplate, BusinessTemplate, ContactTemplate, DevelopersTemplate, HomeTemplate,
    NotFoundTemplate, SecureDownloadTemplate, SiteChrome, SubscribeTemplate,
};

const HOME_REVIEWS: usize = 6;

fn chrome(state: &AppState, current: &'static str) -> SiteChrome {
    SiteChrome {
        lines: BusinessLine::ALL
            .into_iter()
            .filter(|line| *line != BusinessLine::General)
            .collect(),
        developer: state.config.developer.clone(),
        current,
    }
}

/// Public pages degrade to an empty list when a query fails.
fn or_empty<T>(what: &str, result: Result<Vec<T>, sqlx::Error>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        log::error!("Could not load {}: {}", what, e);
        Vec::new()
    })
}

async fn bundle_or_empty(state: &AppState, line: BusinessLine) -> CmsBundle {
    db::cms_bundle(&state.pool, Some(line))
        .await
        .unwrap_or_else(|e| {
            log::error!("Could not load content for {}: {}", line, e);
            CmsBundle {
                business_line: Some(line),
                ..CmsBundle::default()
            }
        })
}

#[get("/")]
pub async fn home(state: web::Data<AppState>) -> impl Responder {
    let bundle = bundle_or_empty(&state, BusinessLine::General).await;
    let mut reviews = or_empty(
        "reviews",
        db::list_reviews(&state.pool, None, true).await,
    );
    reviews.truncate(HOME_REVIEWS);

    render(HomeTemplate {
        site: chrome(&state, "home"),
        bundle,
        reviews,
    })
}

#[get("/{line:bike-lpg|filling-station|furniture-house}")]
pub async fn business_page(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let Some(line) = BusinessLine::from_url_slug(&path.into_inner()) else {
        return not_found_page(&state);
    };

    let mut bundle = bundle_or_empty(&state, line).await;
    if bundle.contacts.is_empty() {
        let general = db::list_contacts(&state.pool, Some(BusinessLine::General));
        bundle.contacts = or_empty("general contacts", general.await);
    }

    render(BusinessTemplate {
        site: chrome(&state, line.url_slug()),
        line,
        bundle,
    })
}

#[get("/about")]
pub async fn about(state: web::Data<AppState>) -> impl Responder {
    let (team, milestones, stats) = tokio::join!(
        db::list_team_members(&state.pool, None),
        db::list_milestones(&state.pool),
        db::list_stats(&state.pool, Some(BusinessLine::General)),
    );

    render(AboutTemplate {
        site: chrome(&state, "about"),
        team: or_empty("team members", team),
        milestones: or_empty("milestones", milestones),
        stats: or_empty("stats", stats),
    })
}

fn contact_page(
    state: &AppState,
    contacts: Vec<tradehouse::models::ContactInfo>,
    form: ContactForm,
    error: Option<String>,
    success: bool,
    status: StatusCode,
) -> HttpResponse {
    render_with_status(
        ContactTemplate {
            site: chrome(state, "contact"),
            contacts,
            form,
            error,
            success,
        },
        status,
    )
}

#[get("/contact")]
pub async fn contact(state: web::Data<AppState>) -> impl Responder {
    let contacts = or_empty("contacts", db::list_contacts(&state.pool, None).await);
    contact_page(&state, contacts, ContactForm::default(), None, false, StatusCode::OK)
}

#[post("/contact")]
pub async fn contact_submit(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<ContactForm>,
) -> impl Responder {
    let form = form.into_inner();
    let contacts = or_empty("contacts", db::list_contacts(&state.pool, None).await);

    if !state
        .rate_limiter
        .check("message", &client_ip(&req), limits::MESSAGE)
    {
        return contact_page(
            &state,
            contacts,
            form,
            Some("Too many messages. Please try again later.".into()),
            false,
            StatusCode::TOO_MANY_REQUESTS,
        );
    }

    let data = FormMessageCreate {
        name: form.name.clone(),
        email: form.email.clone(),
        phone: form.phone.clone(),
        business_line: form
            .business_line
            .as_deref()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default(),
        subject: form.subject.clone(),
        message: form.message.clone(),
    };

    let data = match data.normalized() {
        Ok(data) => data,
        Err(e) => {
            return contact_page(
                &state,
                contacts,
                form,
                Some(e.to_string()),
                false,
                StatusCode::BAD_REQUEST,
            )
        }
    };

    match db::create_message(&state.pool, &data).await {
        Ok(message) => {
            log::info!("New form message {} from the contact page", message.id);
            let form = ContactForm::default();
            contact_page(&state, contacts, form, None, true, StatusCode::OK)
        }
        Err(e) => {
            log::error!("Could not store contact message: {}", e);
            contact_page(
                &state,
                contacts,
                form,
                Some(generic_error_message("message")),
                false,
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    }
}

#[post("/subscribe")]
pub async fn subscribe(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<SubscribeForm>,
) -> impl Responder {
    let respond = |subscribed: bool, message: String, status: StatusCode| {
        render_with_status(
            SubscribeTemplate {
                site: chrome(&state, "subscribe"),
                subscribed,
                message,
            },
            status,
        )
    };

    if !state
        .rate_limiter
        .check("subscribe", &client_ip(&req), limits::SUBSCRIBE)
    {
        return respond(
            false,
            "Too many attempts. Please try again later.".into(),
            StatusCode::TOO_MANY_REQUESTS,
        );
    }

    let data = match (SubscriberCreate {
        email: form.into_inner().email,
    })
    .normalized()
    {
        Ok(data) => data,
        Err(e) => return respond(false, e.to_string(), StatusCode::BAD_REQUEST),
    };

    match db::add_subscriber(&state.pool, &data).await {
        Ok(_) => respond(
            true,
            "Thanks for subscribing! We'll keep you posted.".into(),
            StatusCode::OK,
        ),
        Err(ResourceError::AlreadyExists { .. }) => respond(
            true,
            "You're already on our mailing list.".into(),
            StatusCode::OK,
        ),
        Err(e) => {
            log::error!("Could not add subscriber: {}", e);
            respond(
                false,
                generic_error_message("subscription"),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    }
}

#[get("/developers")]
pub async fn developers(state: web::Data<AppState>) -> impl Responder {
    let thumbnail_url = state
        .config
        .developer
        .as_ref()
        .map(|dev| media::thumbnail_url(&state.config.screenshot_service_url, &dev.url));

    render(DevelopersTemplate {
        site: chrome(&state, "developers"),
        thumbnail_url,
    })
}

#[get("/secure-download")]
pub async fn secure_download(state: web::Data<AppState>) -> impl Responder {
    render(SecureDownloadTemplate {
        site: chrome(&state, "secure-download"),
        enabled: state.config.secure_download.redirect_url.is_some(),
    })
}

fn not_found_page(state: &AppState) -> HttpResponse {
    render_with_status(
        NotFoundTemplate {
            site: chrome(state, ""),
        },
        StatusCode::NOT_FOUND,
    )
}

/// Fallback for unmatched routes: JSON under `/api`, the 404 page elsewhere.
pub async fn not_found(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    if req.path().starts_with("/api/") || req.path() == "/api" {
        return HttpResponse::NotFound().json(json!({ "error": "Not found" }));
    }
    not_found_page(&state)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(home)
        .service(business_page)
        .service(about)
        .service(contact)
        .service(contact_submit)
        .service(subscribe)
        .service(developers)
        .service(secure_download);
}
