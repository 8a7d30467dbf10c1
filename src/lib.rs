//! Scene Renamer Library
//!
//! A library for normalizing scene-release TV episode filenames into one
//! canonical form, with an explicit escalation path for names it cannot
//! confidently parse.

pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{Error, Result};
