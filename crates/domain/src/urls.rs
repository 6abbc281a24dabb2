//! Public URL composition
//!
//! The configured base URL and image root may or may not carry slashes at
//! their edges; these helpers normalize a single slash at each join point.

use uuid::Uuid;

pub fn strip_trailing_slash(s: &str) -> &str {
    s.strip_suffix('/').unwrap_or(s)
}

pub fn strip_leading_slash(s: &str) -> &str {
    s.strip_prefix('/').unwrap_or(s)
}

/// Fully qualified public URL for a stored image
pub fn image_url(base_url: &str, public_image_root: &str, image_name: &str) -> String {
    format!(
        "{}/{}/{}",
        strip_trailing_slash(base_url),
        strip_leading_slash(strip_trailing_slash(public_image_root)),
        strip_leading_slash(image_name)
    )
}

/// Canonical long URL for a post, used as input to the shortener
pub fn post_url(base_url: &str, id: &Uuid) -> String {
    format!("{}/post/{}", strip_trailing_slash(base_url), id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_url_normalizes_slashes() {
        let expected = "http://example.com/images/upload/abc.png";
        assert_eq!(
            image_url("http://example.com/", "/images/upload/", "abc.png"),
            expected
        );
        assert_eq!(
            image_url("http://example.com", "images/upload", "/abc.png"),
            expected
        );
    }

    #[test]
    fn post_url_strips_trailing_slash() {
        let id = Uuid::nil();
        assert_eq!(
            post_url("http://example.com/", &id),
            format!("http://example.com/post/{id}")
        );
    }
}
