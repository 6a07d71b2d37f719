//! UI rendering modules for the Biblio client.
//!
//! This module contains all egui-based rendering code, organized by view:
//! - `search`: query bar, result cards and the guidance modal
//! - `chat`: transcript, suggestion prompts and the recommendation form
//! - `admin`: admin code gate and the scan control panel
//! - `toasts`: transient status messages
//! - `theme`: color schemes and styling utilities

pub mod admin;
pub mod chat;
pub mod search;
pub mod theme;
pub mod toasts;
