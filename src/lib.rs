//! synonym-shortlist: review thesaurus candidates and keep the good ones.

pub mod export;
pub mod logging;
pub mod source;
pub mod tui;
pub mod types;
