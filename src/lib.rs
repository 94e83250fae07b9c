// src/lib.rs
//! Pulls chapter descriptions out of a saved TARIC consultation page and
//! formats them as SQL `VALUES` tuples.
pub mod app;
pub mod clipboard;
pub mod extractors;
pub mod sql;
pub mod storage;
pub mod utils;
