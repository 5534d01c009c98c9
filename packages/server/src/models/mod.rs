pub mod album;
pub mod auth;
pub mod blog;
pub mod dashboard;
pub mod journal;
pub mod profile;
pub mod shared;
