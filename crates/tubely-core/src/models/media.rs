use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;

/// Tolerance used when matching a width/height ratio against a known aspect.
pub const ASPECT_RATIO_TOLERANCE: f64 = 0.01;

const LANDSCAPE_RATIO: f64 = 16.0 / 9.0;
const PORTRAIT_RATIO: f64 = 9.0 / 16.0;

/// Kind of asset being attached to a video record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Video,
    Thumbnail,
}

impl AssetKind {
    /// Name of the record field the asset's locator is written to.
    pub fn locator_field(&self) -> &'static str {
        match self {
            AssetKind::Video => "video_url",
            AssetKind::Thumbnail => "thumbnail_url",
        }
    }
}

impl Display for AssetKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AssetKind::Video => write!(f, "video"),
            AssetKind::Thumbnail => write!(f, "thumbnail"),
        }
    }
}

/// Pixel dimensions of the first video stream in a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoGeometry {
    pub width: u32,
    pub height: u32,
}

impl VideoGeometry {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn orientation(&self) -> OrientationClass {
        OrientationClass::from_dimensions(self.width, self.height)
    }
}

/// Aspect-ratio bucket a video is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrientationClass {
    Landscape,
    Portrait,
    Other,
}

impl OrientationClass {
    /// Classify a width/height pair.
    ///
    /// 16:9 within [`ASPECT_RATIO_TOLERANCE`] is landscape, 9:16 is portrait and
    /// everything else (including a zero height) is `Other`.
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        if height == 0 {
            return OrientationClass::Other;
        }

        let ratio = f64::from(width) / f64::from(height);
        if (ratio - LANDSCAPE_RATIO).abs() < ASPECT_RATIO_TOLERANCE {
            OrientationClass::Landscape
        } else if (ratio - PORTRAIT_RATIO).abs() < ASPECT_RATIO_TOLERANCE {
            OrientationClass::Portrait
        } else {
            OrientationClass::Other
        }
    }

    /// Storage prefix for objects of this class.
    pub fn bucket_name(&self) -> &'static str {
        match self {
            OrientationClass::Landscape => "landscape",
            OrientationClass::Portrait => "portrait",
            OrientationClass::Other => "other",
        }
    }
}

impl Display for OrientationClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.bucket_name())
    }
}
