//! Database repositories for data access layer
//
// Video records
pub mod video;
//
#[cfg(feature = "records")]
mod records;

pub use video::VideoRepository;
