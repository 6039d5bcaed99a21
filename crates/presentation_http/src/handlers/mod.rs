//! HTTP request handlers

pub mod chat;
pub mod health;
pub mod interpret;
pub mod scenarios;
