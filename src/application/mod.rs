//! Application services layer: entity model, authors, avatars, seams.

pub mod authors;
pub mod avatar;
pub mod entity;
pub mod store;
