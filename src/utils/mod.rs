pub mod files;
pub mod jwt;
pub mod security;
