//! Base64 data URLs as used for thumbnails
//!
//! ```
//! # use imgmeta_exif::data_url;
//! let url = data_url::encode("image/jpeg", &[0xFF, 0xD8]);
//! assert_eq!(url, "data:image/jpeg;base64,/9g=");
//! assert_eq!(data_url::decode(&url).unwrap(), [0xFF, 0xD8]);
//! ```

use base64::Engine;

use crate::error::{Error, Result};

const SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// Everything before the payload
pub fn prefix(mime_type: &str) -> String {
    format!("{SCHEME}{mime_type}{BASE64_MARKER}")
}

pub fn encode(mime_type: &str, data: &[u8]) -> String {
    let mut url = prefix(mime_type);
    base64::engine::general_purpose::STANDARD.encode_string(data, &mut url);
    url
}

/// Payload of a base64 data URL
pub fn decode(url: &str) -> Result<Vec<u8>> {
    let (_, payload) = url
        .strip_prefix(SCHEME)
        .and_then(|x| x.split_once(BASE64_MARKER))
        .ok_or(Error::InvalidDataUrl)?;

    Ok(base64::engine::general_purpose::STANDARD.decode(payload)?)
}

pub fn mime_type(url: &str) -> Option<&str> {
    url.strip_prefix(SCHEME)?
        .split_once(BASE64_MARKER)
        .map(|(mime_type, _)| mime_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_len() {
        assert_eq!(prefix("image/jpeg").len(), 23);
    }

    #[test]
    fn mime() {
        assert_eq!(mime_type("data:image/png;base64,AAAA"), Some("image/png"));
        assert_eq!(mime_type("image/png;base64,AAAA"), None);
    }

    #[test]
    fn invalid() {
        assert!(matches!(
            decode("data:image/jpeg,abc"),
            Err(Error::InvalidDataUrl)
        ));
        assert!(matches!(
            decode("data:image/jpeg;base64,*"),
            Err(Error::Base64(_))
        ));
    }
}
