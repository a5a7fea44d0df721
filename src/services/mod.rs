// src/services/mod.rs
pub mod diagnostics;
pub mod upstream;
