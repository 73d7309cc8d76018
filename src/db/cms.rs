use sqlx::PgPool;

use super::{
    list_banners, list_contacts, list_faqs, list_products, list_reviews, list_sections,
    list_stats, list_videos,
};
use crate::models::{BusinessLine, CmsBundle};

/// Public content for one line (or every line), as rendered on its page.
pub async fn cms_bundle(
    pool: &PgPool,
    line: Option<BusinessLine>,
) -> Result<CmsBundle, sqlx::Error> {
    let (products, banners, videos, faqs, reviews, stats, sections, contacts) =
        tokio::try_join!(
            list_products(pool, line),
            list_banners(pool, line, true),
            list_videos(pool, line),
            list_faqs(pool, line, None),
            list_reviews(pool, line, true),
            list_stats(pool, line),
            list_sections(pool, line),
            list_contacts(pool, line),
        )?;

    Ok(CmsBundle {
        business_line: line,
        products,
        banners,
        videos,
        faqs,
        reviews,
        stats,
        sections,
        contacts,
    })
}
