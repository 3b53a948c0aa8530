//! CLI command implementations.

pub mod apply;
pub mod checksum;
pub mod export;
pub mod info;
pub mod layout;
pub mod lines;
pub mod roster;
