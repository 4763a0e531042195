//! # Data Transfer Objects
//!
//! ユースケースに渡す設定

pub mod load_config;
pub mod upload_config;
