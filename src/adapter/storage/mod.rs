//! Cloud Storage Adapter Modules
//!
//! Cloud Storage統合のためのアダプターモジュール

pub mod client;
