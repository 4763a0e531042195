//! # Domain Services
//!
//! エンティティに属さないビジネスルール

pub mod poll_schedule;
