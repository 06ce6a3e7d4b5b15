//! Tubely Database Library
//!
//! Postgres repositories for video records.

pub mod db;

pub use db::VideoRepository;
