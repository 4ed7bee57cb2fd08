//! Texpal CLI library.
//!
//! This crate provides the command implementations behind the `texpal`
//! binary plus the document loading helpers they share.

pub mod commands;
pub mod input;
