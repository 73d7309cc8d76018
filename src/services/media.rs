//! Helpers for the third-party media the site embeds: YouTube players,
//! website screenshot thumbnails, and the files admins upload.

use url::Url;
use uuid::Uuid;

const YOUTUBE_EMBED_BASE: &str = "https://www.youtube-nocookie.com/embed/";

/// Upload extensions we accept, with the content type we serve them as.
pub const ALLOWED_UPLOADS: [(&str, &str); 7] = [
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("webp", "image/webp"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("pdf", "application/pdf"),
];

fn is_video_id(id: &str) -> bool {
    id.len() == 11
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Video id of a YouTube watch, shorts, live, embed or youtu.be link.
pub fn youtube_id(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw.trim()).ok()?;
    let host = parsed.host_str()?;
    let host = host
        .strip_prefix("www.")
        .or_else(|| host.strip_prefix("m."))
        .unwrap_or(host);

    let id = match host {
        "youtu.be" => parsed.path_segments()?.next()?.to_string(),
        "youtube.com" | "youtube-nocookie.com" => {
            let mut segments = parsed.path_segments()?;
            match segments.next()? {
                "watch" => parsed
                    .query_pairs()
                    .find(|(k, _)| k == "v")
                    .map(|(_, v)| v.into_owned())?,
                "shorts" | "embed" | "live" => segments.next()?.to_string(),
                _ => return None,
            }
        }
        _ => return None,
    };

    is_video_id(&id).then_some(id)
}

/// Player URL for an iframe. Only YouTube links have one; the page's
/// `frame-src` allows no other player.
pub fn embed_url(raw: &str) -> Option<String> {
    youtube_id(raw).map(|id| format!("{YOUTUBE_EMBED_BASE}{id}"))
}

/// Screenshot-service URL for a site, e.g.
/// `https://image.thum.io/get/width/600/https://example.com`.
pub fn thumbnail_url(service_base: &str, site_url: &str) -> String {
    let base = service_base.trim();
    if base.ends_with('/') {
        format!("{base}{}", site_url.trim())
    } else {
        format!("{base}/{}", site_url.trim())
    }
}

/// Lowercased extension of an uploaded file name, if it is one we accept.
pub fn upload_extension(file_name: &str) -> Option<&'static str> {
    let (_, ext) = file_name.trim().rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    ALLOWED_UPLOADS
        .iter()
        .find(|(allowed, _)| *allowed == ext)
        .map(|(allowed, _)| *allowed)
}

/// Name an upload is stored under. Client names are never reused on disk.
pub fn stored_file_name(ext: &str) -> String {
    format!("{}.{}", Uuid::new_v4(), ext)
}
