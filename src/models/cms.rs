use serde::{Deserialize, Serialize};

use super::{
    Banner, BusinessLine, ContactInfo, Faq, Product, Review, Section, Stat, Video,
};

/// Everything a business-line page renders, in one payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CmsBundle {
    pub business_line: Option<BusinessLine>,
    pub products: Vec<Product>,
    pub banners: Vec<Banner>,
    pub videos: Vec<Video>,
    pub faqs: Vec<Faq>,
    pub reviews: Vec<Review>,
    pub stats: Vec<Stat>,
    pub sections: Vec<Section>,
    pub contacts: Vec<ContactInfo>,
}

impl CmsBundle {
    pub fn average_rating(&self) -> Option<f32> {
        if self.reviews.is_empty() {
            return None;
        }
        let sum: i32 = self.reviews.iter().map(|r| i32::from(r.rating)).sum();
        Some(sum as f32 / self.reviews.len() as f32)
    }
}
