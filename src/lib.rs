pub mod config;
pub mod lore;
pub mod mail;
