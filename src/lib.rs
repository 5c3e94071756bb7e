// SPDX-License-Identifier: MPL-2.0
//! `lingo` is a small runtime translation layer for user interfaces.
//!
//! It keeps an ordered list of languages, loads one nested translation table
//! at a time, resolves dotted key paths with fallback to the default
//! language, and remembers the user's choice between runs.

#![doc(html_root_url = "https://docs.rs/lingo/0.3.0")]

pub mod config;
pub mod error;
pub mod i18n;
pub mod paths;
pub mod storage;
