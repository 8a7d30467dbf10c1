//! External service clients.

pub mod llm;
