use std::fmt::{Display, Formatter, Result as FmtResult};
use tubely_core::{AssetKind, Config};

/// Media type validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Unsupported media type: {content_type} (allowed: {allowed:?})")]
    UnsupportedMediaType {
        content_type: String,
        allowed: Vec<String>,
    },

    #[error("Malformed Content-Type header: {0:?}")]
    MalformedContentType(String),
}

/// A parsed `type/subtype` pair, lowercased and stripped of parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    essence: String,
    slash: usize,
}

impl MediaType {
    /// `type/subtype`, e.g. `video/mp4`.
    pub fn essence(&self) -> &str {
        &self.essence
    }

    pub fn top_level(&self) -> &str {
        &self.essence[..self.slash]
    }

    pub fn subtype(&self) -> &str {
        &self.essence[self.slash + 1..]
    }

    /// File extension used for storage keys. This is the subtype verbatim,
    /// so `image/jpeg` yields `jpeg`.
    pub fn extension(&self) -> &str {
        self.subtype()
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.essence)
    }
}

fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '!' | '#' | '$' | '&' | '-' | '^' | '_' | '.' | '+')
        })
}

/// Parse a `Content-Type` header value into its media type.
pub fn parse_media_type(raw: &str) -> Result<MediaType, ValidationError> {
    let essence = raw
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    let malformed = || ValidationError::MalformedContentType(raw.to_string());

    let (top, sub) = essence.split_once('/').ok_or_else(malformed)?;
    if !is_token(top) || !is_token(sub) {
        return Err(malformed());
    }

    let slash = top.len();
    Ok(MediaType { essence, slash })
}

/// Checks a declared content type against the allow-list for one asset kind.
#[derive(Debug, Clone)]
pub struct MediaValidator {
    kind: AssetKind,
    allowed_content_types: Vec<String>,
}

impl MediaValidator {
    pub fn new(kind: AssetKind, allowed_content_types: Vec<String>) -> Self {
        Self {
            kind,
            allowed_content_types: allowed_content_types
                .into_iter()
                .map(|ct| ct.trim().to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn for_asset(config: &Config, kind: AssetKind) -> Self {
        let allowed = match kind {
            AssetKind::Video => config.media.video_allowed_content_types.clone(),
            AssetKind::Thumbnail => config.media.thumbnail_allowed_content_types.clone(),
        };
        Self::new(kind, allowed)
    }

    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    /// Validate content type
    pub fn validate(&self, content_type: &str) -> Result<MediaType, ValidationError> {
        let media_type = parse_media_type(content_type)?;

        if !self
            .allowed_content_types
            .iter()
            .any(|ct| ct == media_type.essence())
        {
            return Err(ValidationError::UnsupportedMediaType {
                content_type: media_type.essence().to_string(),
                allowed: self.allowed_content_types.clone(),
            });
        }

        Ok(media_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thumbnails() -> MediaValidator {
        MediaValidator::new(
            AssetKind::Thumbnail,
            vec!["image/jpeg".to_string(), "image/png".to_string()],
        )
    }

    #[test]
    fn test_parse_strips_parameters_and_case() {
        let mt = parse_media_type(" Video/MP4 ; codecs=\"avc1\"").unwrap();
        assert_eq!(mt.essence(), "video/mp4");
        assert_eq!(mt.top_level(), "video");
        assert_eq!(mt.extension(), "mp4");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for raw in ["", "   ", "video", "/mp4", "video/", "video/mp 4", "vi deo/mp4"] {
            assert!(
                matches!(
                    parse_media_type(raw),
                    Err(ValidationError::MalformedContentType(_))
                ),
                "{raw:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_allow_list() {
        let v = thumbnails();
        assert_eq!(v.validate("image/jpeg").unwrap().extension(), "jpeg");
        assert_eq!(v.validate("image/png; charset=binary").unwrap().extension(), "png");

        match v.validate("image/gif") {
            Err(ValidationError::UnsupportedMediaType { content_type, .. }) => {
                assert_eq!(content_type, "image/gif")
            }
            other => panic!("expected UnsupportedMediaType, got {:?}", other),
        }
    }

    #[test]
    fn test_video_rejects_quicktime() {
        let v = MediaValidator::new(AssetKind::Video, vec!["video/mp4".to_string()]);
        assert!(v.validate("video/mp4").is_ok());
        assert!(matches!(
            v.validate("video/quicktime"),
            Err(ValidationError::UnsupportedMediaType { .. })
        ));
        assert_eq!(v.kind(), AssetKind::Video);
    }
}
