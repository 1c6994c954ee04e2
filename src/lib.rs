//! BookTrack Application Library
//!
//! This library provides the catalog modules for the BookTrack service.

pub mod modules;
