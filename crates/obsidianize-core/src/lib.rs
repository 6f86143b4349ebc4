//! Obsidianize Core Library
//!
//! Conversion logic for rewriting a Notion export into an Obsidian-ready
//! vault: name truncation, link rewriting, CSV table conversion, and the
//! recursive directory walk that ties them together.

pub mod error;
pub mod links;
pub mod logging;
pub mod table;
pub mod truncate;
pub mod walker;
