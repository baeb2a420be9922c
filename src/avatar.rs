use reqwest::Url;

/// Decoded RGBA8 pixels of an avatar thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarPixels {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Adds the `s` size hint understood by GitHub's avatar CDN.
///
/// Returns `None` when `avatar_url` is not an absolute URL.
pub fn sized_avatar_url(avatar_url: &str, size: u32) -> Option<Url> {
    let mut url = Url::parse(avatar_url).ok()?;
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "s")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair("s", &size.to_string());
    Some(url)
}

/// Decodes image bytes into a `size`x`size` RGBA thumbnail.
pub fn decode_avatar(bytes: &[u8], size: u32) -> Option<AvatarPixels> {
    let decoded = image::load_from_memory(bytes).ok()?;

    // Servers may ignore the size hint, so always resize.
    let rgba = decoded.thumbnail_exact(size, size).to_rgba8();
    let (width, height) = rgba.dimensions();

    Some(AvatarPixels {
        rgba: rgba.into_raw(),
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageFormat, Rgba, RgbaImage};

    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_sized_url_appends_hint() {
        let url = sized_avatar_url("https://avatars.example.com/u/1?v=4", 100).unwrap();
        assert_eq!(url.as_str(), "https://avatars.example.com/u/1?v=4&s=100");
    }

    #[test]
    fn test_sized_url_replaces_existing_hint() {
        let url = sized_avatar_url("http://x/a.png?s=460", 64).unwrap();
        assert_eq!(url.query(), Some("s=64"));
    }

    #[test]
    fn test_sized_url_rejects_relative() {
        assert!(sized_avatar_url("/a.png", 64).is_none());
    }

    #[test]
    fn test_decode_resizes_to_square() {
        let pixels = decode_avatar(&png_bytes(40, 20), 16).unwrap();
        assert_eq!((pixels.width, pixels.height), (16, 16));
        assert_eq!(pixels.rgba.len(), 16 * 16 * 4);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_avatar(b"definitely not an image", 16).is_none());
    }
}
