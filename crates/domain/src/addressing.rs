//! Content-addressed storage names for uploaded files

use md5::{Digest, Md5};

/// Derive the storage name for an upload: lowercase-hex MD5 of the content
/// bytes, a dot, then the original filename's extension.
///
/// Byte-identical content with the same extension always maps to the same
/// name, so a re-upload silently overwrites the stored file. Collisions are
/// accepted as negligible, not defended against.
pub fn content_address(content: &[u8], original_name: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(content);
    format!("{:x}.{}", hasher.finalize(), extension(original_name))
}

/// The substring after the last `.` in `filename`, empty when no dot is
/// present. A missing extension is not an error.
pub fn extension(filename: &str) -> &str {
    filename.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_after_last_dot() {
        assert_eq!(extension("photo.png"), "png");
        assert_eq!(extension("archive.tar.gz"), "gz");
        assert_eq!(extension(".hidden"), "hidden");
    }

    #[test]
    fn extension_empty_without_dot() {
        assert_eq!(extension("README"), "");
        assert_eq!(extension(""), "");
    }

    #[test]
    fn address_is_md5_hex_plus_extension() {
        // md5("hello world") = 5eb63bbbe01eeed093cb22bb8f5acdc3
        assert_eq!(
            content_address(b"hello world", "photo.png"),
            "5eb63bbbe01eeed093cb22bb8f5acdc3.png"
        );
    }

    #[test]
    fn address_is_deterministic() {
        let a = content_address(b"same bytes", "a.jpg");
        let b = content_address(b"same bytes", "b.jpg");
        assert_eq!(a, b);
    }

    #[test]
    fn address_differs_by_content() {
        let a = content_address(b"one", "photo.png");
        let b = content_address(b"two", "photo.png");
        assert_ne!(a, b);
    }
}
