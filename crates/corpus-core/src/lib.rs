//! # corpus-core
//!
//! Core types for the Corpus study index.
//!
//! This crate provides the foundational types shared across all Corpus crates:
//! - Entity structs for studies and analysis records
//! - The name-kind enum distinguishing the author and keyword dimensions
//! - View objects returned across the request/response contract
//! - The slug generator and its stop-word configuration
//!
//! Everything here is pure — no I/O, no database access.

pub mod entities;
pub mod enums;
pub mod slug;
pub mod views;
