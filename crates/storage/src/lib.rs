#![forbid(unsafe_code)]

pub mod local;
pub mod repository;
pub mod rest;
pub mod sqlite;

pub use repository::{
    CareerStatsRepository, InMemoryRepository, LeaderboardRepository, LocalStore, Storage,
    StorageError,
};
