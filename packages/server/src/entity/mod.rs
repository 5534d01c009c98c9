pub mod album_item;
pub mod blog_post;
pub mod gallery;
pub mod journal_entry;
pub mod profile_section;
pub mod user;
