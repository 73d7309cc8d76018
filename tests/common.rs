#![allow(dead_code)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use tradehouse::models::*;

const SQL_TIME_FMT: &str = "%Y-%m-%d %H:%M:%S%#z";

pub fn parse_time(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_str(s, SQL_TIME_FMT)
        .expect("Invalid time format in test helper")
        .with_timezone(&Utc)
}

pub fn id(s: &str) -> Uuid {
    Uuid::parse_str(s).expect("Invalid uuid in test helper")
}

pub const SEED_ADMIN_ID: &str = "00000000-0000-0000-000d-000000000000";
pub const SEED_LIVE_SESSION: &str = "00000000-0000-0000-000e-000000000000";
pub const SEED_EXPIRED_SESSION: &str = "00000000-0000-0000-000e-000000000001";
pub const SEED_UNKNOWN_ID: &str = "00000000-0000-0000-ffff-000000000000";

pub fn get_seed_product_kit() -> Product {
    Product {
        id: id("00000000-0000-0000-0001-000000000000"),
        business_line: BusinessLine::BikeLpg,
        name: "Bike LPG Kit".to_string(),
        description: "Certified conversion kit for 100-150cc bikes".to_string(),
        price_label: Some("From 4,999".to_string()),
        image_url: None,
        features: vec!["Certified".to_string(), "2 year warranty".to_string()],
        position: 0,
        created_at: parse_time("2026-01-04 10:00:00+00"),
        edited_at: parse_time("2026-01-04 10:00:00+00"),
    }
}

pub fn get_seed_product_install() -> Product {
    Product {
        id: id("00000000-0000-0000-0001-000000000001"),
        business_line: BusinessLine::BikeLpg,
        name: "Installation".to_string(),
        description: "Fitting by trained mechanics".to_string(),
        price_label: None,
        image_url: None,
        features: vec![],
        position: 1,
        created_at: parse_time("2026-01-04 10:05:00+00"),
        edited_at: parse_time("2026-01-04 10:05:00+00"),
    }
}

pub fn get_seed_product_teak() -> Product {
    Product {
        id: id("00000000-0000-0000-0001-000000000002"),
        business_line: BusinessLine::FurnitureHouse,
        name: "Teak Dining Set".to_string(),
        description: "Six seats, solid teak".to_string(),
        price_label: Some("On request".to_string()),
        image_url: Some("https://cdn.example.com/teak.jpg".to_string()),
        features: vec!["Solid teak".to_string()],
        position: 0,
        created_at: parse_time("2026-01-04 11:00:00+00"),
        edited_at: parse_time("2026-01-04 11:00:00+00"),
    }
}

pub fn get_seed_banner_active() -> Banner {
    Banner {
        id: id("00000000-0000-0000-0002-000000000000"),
        business_line: BusinessLine::BikeLpg,
        title: "Ride cheaper".to_string(),
        subtitle: "Save up to 40% on fuel".to_string(),
        image_url: "https://cdn.example.com/ride.jpg".to_string(),
        cta_label: Some("Book a fitting".to_string()),
        cta_url: Some("/contact".to_string()),
        active: true,
        position: 0,
        created_at: parse_time("2026-01-04 10:00:00+00"),
        edited_at: parse_time("2026-01-04 10:00:00+00"),
    }
}

pub fn get_seed_video_ids() -> [Uuid; 3] {
    [
        id("00000000-0000-0000-0003-000000000000"),
        id("00000000-0000-0000-0003-000000000001"),
        id("00000000-0000-0000-0003-000000000002"),
    ]
}

pub fn get_seed_section_showroom() -> Section {
    Section {
        id: id("00000000-0000-0000-000a-000000000000"),
        business_line: BusinessLine::FurnitureHouse,
        slug: "showroom".to_string(),
        title: "Our showroom".to_string(),
        body: String::new(),
        images: vec!["https://cdn.example.com/s1.jpg".to_string()],
        position: 0,
        created_at: parse_time("2026-01-04 10:00:00+00"),
        edited_at: parse_time("2026-01-04 10:00:00+00"),
    }
}

pub fn get_seed_contact_office() -> ContactInfo {
    ContactInfo {
        id: id("00000000-0000-0000-0009-000000000000"),
        business_line: BusinessLine::General,
        label: "Head office".to_string(),
        phone: Some("+91 98765 43210".to_string()),
        email: Some("hello@example.com".to_string()),
        address: Some("Main Road".to_string()),
        map_url: None,
        whatsapp: None,
        created_at: parse_time("2026-01-04 10:00:00+00"),
        edited_at: parse_time("2026-01-04 10:00:00+00"),
    }
}

pub fn get_seed_message_omar() -> FormMessage {
    FormMessage {
        id: id("00000000-0000-0000-000c-000000000002"),
        name: "Omar".to_string(),
        email: "omar@example.com".to_string(),
        phone: None,
        business_line: BusinessLine::BikeLpg,
        subject: None,
        message: "Price for 125cc?".to_string(),
        read: false,
        created_at: parse_time("2026-01-03 10:00:00+00"),
    }
}
