pub mod cache;
pub mod events;
pub mod oauth;
pub mod tokens;
