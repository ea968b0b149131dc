//! GhostMocks Core Library
//!
//! This library turns HAR captures of browser traffic into redacted JSON
//! fixtures and Playwright specs that replay those fixtures through network
//! interception.

pub mod builders;
pub mod config;
pub mod error;
pub mod fixture;
pub mod generate;
pub mod har;
pub mod redact;
pub mod templates;
pub mod utils;

pub use crate::{
    config::{Config, DuplicatePolicy},
    error::{Error, Result},
    generate::{generate, generate_with_progress, GenerationEvent, GenerationSummary},
    har::{ExtractedResponse, HarDocument},
    redact::Redactor,
    templates::SpecTemplate,
};
