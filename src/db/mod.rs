pub use admins::*;
pub use banners::*;
pub use cms::*;
pub use contacts::*;
pub use db::*;
pub use faqs::*;
pub use messages::*;
pub use milestones::*;
pub use pins::*;
pub use products::*;
pub use reviews::*;
pub use sections::*;
pub use stats::*;
pub use subscribers::*;
pub use team_members::*;
pub use videos::*;

mod admins;
mod banners;
mod cms;
mod contacts;
mod db;
mod faqs;
mod messages;
mod milestones;
mod pins;
mod products;
mod reviews;
mod sections;
mod stats;
mod subscribers;
mod team_members;
mod videos;

/// `%needle%` for ILIKE, with the pattern metacharacters escaped.
pub(crate) fn like_pattern(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len() + 2);
    out.push('%');
    for c in needle.trim().chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern(" kit "), "%kit%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
