//! Application-wide constants.

/// Path prefix for all JSON API routes.
pub const API_PREFIX: &str = "/api";

/// Path prefix under which locally stored assets are served.
pub const ASSETS_PREFIX: &str = "/assets";

/// Issuer claim expected on access tokens.
pub const ACCESS_TOKEN_ISSUER: &str = "tubely-access";

/// Multipart field carrying a video upload.
pub const VIDEO_FORM_FIELD: &str = "video";

/// Multipart field carrying a thumbnail upload.
pub const THUMBNAIL_FORM_FIELD: &str = "thumbnail";

/// Prefix for scratch files created while an upload is in flight.
pub const SCRATCH_FILE_PREFIX: &str = "tubely-upload-";

/// Suffix appended to a staged file for its fast-start rewrite.
pub const FAST_START_SUFFIX: &str = ".processing";

/// Number of random bytes in a storage key.
pub const STORAGE_KEY_BYTES: usize = 32;
