pub use mailer::{Email, Mailer};
pub use password::PasswordManager;
pub use pin::PinGate;

pub mod mailer;
pub mod media;
pub mod pagination;
pub mod pin;
mod password;
