pub use admin::*;
pub use banner::*;
pub use business_line::*;
pub use cms::*;
pub use contact::*;
pub use download_pin::*;
pub use faq::*;
pub use form_message::*;
pub use milestone::*;
pub use product::*;
pub use review::*;
pub use section::*;
pub use stat::*;
pub use subscriber::*;
pub use team_member::*;
pub use video::*;

mod admin;
mod banner;
mod business_line;
mod cms;
mod contact;
mod download_pin;
mod faq;
mod form_message;
mod milestone;
mod product;
mod review;
mod section;
mod stat;
mod subscriber;
mod team_member;
mod video;
