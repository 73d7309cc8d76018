use serde::Deserialize;

use tradehouse::services::pagination::PageQuery;

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct AuthQuery {
    pub error: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct LineQuery {
    pub business_line: Option<String>,
}

/// Banner and review listings. The `include_*` flags are honoured for
/// admins only.
#[derive(Deserialize, Default)]
pub struct ListQuery {
    pub business_line: Option<String>,
    #[serde(default)]
    pub include_inactive: bool,
    #[serde(default)]
    pub include_unpublished: bool,
}

#[derive(Deserialize, Default)]
pub struct FaqQuery {
    pub business_line: Option<String>,
    pub q: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct MessagesQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    #[serde(default)]
    pub unread: bool,
}

impl MessagesQuery {
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// Public contact page form.
#[derive(Deserialize, Default, Clone)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    pub business_line: Option<String>,
    pub subject: Option<String>,
    #[serde(default)]
    pub message: String,
}

#[derive(Deserialize)]
pub struct SubscribeForm {
    #[serde(default)]
    pub email: String,
}
