//! Biblio Client library.
//!
//! This module re-exports the core components for testing and extension.

pub mod api;
pub mod app;
pub mod auth;
pub mod backend;
pub mod config;
pub mod models;
pub mod protocol;
pub mod recommend;
pub mod reveal;
pub mod state;
pub mod transcript;
pub mod ui;
