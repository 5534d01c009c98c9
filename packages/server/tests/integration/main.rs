mod common;

mod album;
mod auth;
mod blog;
mod dashboard;
mod journal;
