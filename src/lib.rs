//! Records Grid Library
//!
//! A paginated records table with user-resizable, persisted column widths and
//! a bulk column-width editor. Everything below `views` and `app` is headless
//! and driven through plain method calls.

rust_i18n::i18n!("locales", fallback = "en");

pub mod app;
pub mod constants;
pub mod domain;
pub mod error;
pub mod helpers;
pub mod i18n;
pub mod layout;
pub mod persistence;
pub mod services;
pub mod states;
pub mod utils;
pub mod views;
