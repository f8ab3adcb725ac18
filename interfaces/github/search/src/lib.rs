//! GitHub repository search client
//!
//! Fetches a single page of the most starred repositories for a language.

pub mod index;
