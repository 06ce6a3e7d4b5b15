pub mod media;
pub mod video;

pub use media::{AssetKind, OrientationClass, VideoGeometry};
pub use video::{CreateVideoRequest, Video};
