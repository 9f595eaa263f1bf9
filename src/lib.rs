//! Mood and genre based movie recommendations backed by TMDB.

pub mod config;
pub mod error;
pub mod handlers;
pub mod moods;
pub mod query;
pub mod tmdb;
