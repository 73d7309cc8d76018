use askama::Template;

use tradehouse::config::DeveloperCredit;
use tradehouse::models::{
    Banner, BusinessLine, CmsBundle, ContactInfo, Faq, FormMessage, Milestone,
    Product, Review, Section, Stat, Subscriber, TeamMember, Video,
};
use tradehouse::services::pagination::Paginated;

use crate::web::forms::ContactForm;

/// Shared header/footer data of the public layout.
pub struct SiteChrome {
    pub lines: Vec<BusinessLine>,
    pub developer: Option<DeveloperCredit>,
    pub current: &'static str,
}

#[derive(Template)]
#[template(path = "public/home.html")]
pub struct HomeTemplate {
    pub site: SiteChrome,
    pub bundle: CmsBundle,
    pub reviews: Vec<Review>,
}

#[derive(Template)]
#[template(path = "public/business.html")]
pub struct BusinessTemplate {
    pub site: SiteChrome,
    pub line: BusinessLine,
    pub bundle: CmsBundle,
}

#[derive(Template)]
#[template(path = "public/about.html")]
pub struct AboutTemplate {
    pub site: SiteChrome,
    pub team: Vec<TeamMember>,
    pub milestones: Vec<Milestone>,
    pub stats: Vec<Stat>,
}

#[derive(Template)]
#[template(path = "public/contact.html")]
pub struct ContactTemplate {
    pub site: SiteChrome,
    pub contacts: Vec<ContactInfo>,
    pub form: ContactForm,
    pub error: Option<String>,
    pub success: bool,
}

#[derive(Template)]
#[template(path = "public/subscribe.html")]
pub struct SubscribeTemplate {
    pub site: SiteChrome,
    pub subscribed: bool,
    pub message: String,
}

#[derive(Template)]
#[template(path = "public/developers.html")]
pub struct DevelopersTemplate {
    pub site: SiteChrome,
    pub thumbnail_url: Option<String>,
}

#[derive(Template)]
#[template(path = "public/secure_download.html")]
pub struct SecureDownloadTemplate {
    pub site: SiteChrome,
    pub enabled: bool,
}

#[derive(Template)]
#[template(path = "public/not_found.html")]
pub struct NotFoundTemplate {
    pub site: SiteChrome,
}

/// Shared navigation data of the admin layout.
pub struct AdminNav {
    pub email: String,
    pub unread: i64,
    pub active: &'static str,
}

#[derive(Template)]
#[template(path = "admin/login.html")]
pub struct AdminLoginTemplate {
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/products.html")]
pub struct AdminProductsTemplate {
    pub nav: AdminNav,
    pub lines: [BusinessLine; 4],
    pub items: Vec<Product>,
}

#[derive(Template)]
#[template(path = "admin/banners.html")]
pub struct AdminBannersTemplate {
    pub nav: AdminNav,
    pub lines: [BusinessLine; 4],
    pub items: Vec<Banner>,
}

#[derive(Template)]
#[template(path = "admin/videos.html")]
pub struct AdminVideosTemplate {
    pub nav: AdminNav,
    pub lines: [BusinessLine; 4],
    pub items: Vec<Video>,
}

#[derive(Template)]
#[template(path = "admin/faqs.html")]
pub struct AdminFaqsTemplate {
    pub nav: AdminNav,
    pub lines: [BusinessLine; 4],
    pub items: Vec<Faq>,
    pub query: String,
}

#[derive(Template)]
#[template(path = "admin/reviews.html")]
pub struct AdminReviewsTemplate {
    pub nav: AdminNav,
    pub lines: [BusinessLine; 4],
    pub items: Vec<Review>,
}

#[derive(Template)]
#[template(path = "admin/stats.html")]
pub struct AdminStatsTemplate {
    pub nav: AdminNav,
    pub lines: [BusinessLine; 4],
    pub items: Vec<Stat>,
}

#[derive(Template)]
#[template(path = "admin/team.html")]
pub struct AdminTeamTemplate {
    pub nav: AdminNav,
    pub lines: [BusinessLine; 4],
    pub items: Vec<TeamMember>,
}

#[derive(Template)]
#[template(path = "admin/milestones.html")]
pub struct AdminMilestonesTemplate {
    pub nav: AdminNav,
    pub items: Vec<Milestone>,
}

#[derive(Template)]
#[template(path = "admin/sections.html")]
pub struct AdminSectionsTemplate {
    pub nav: AdminNav,
    pub lines: [BusinessLine; 4],
    pub items: Vec<Section>,
}

#[derive(Template)]
#[template(path = "admin/contacts.html")]
pub struct AdminContactsTemplate {
    pub nav: AdminNav,
    pub lines: [BusinessLine; 4],
    pub items: Vec<ContactInfo>,
}

#[derive(Template)]
#[template(path = "admin/subscribers.html")]
pub struct AdminSubscribersTemplate {
    pub nav: AdminNav,
    pub page: Paginated<Subscriber>,
}

#[derive(Template)]
#[template(path = "admin/messages.html")]
pub struct AdminMessagesTemplate {
    pub nav: AdminNav,
    pub page: Paginated<FormMessage>,
    pub unread_only: bool,
}
