pub mod config;
pub mod editor;
pub mod error;
pub mod i18n;
pub mod retry;
pub mod store;
