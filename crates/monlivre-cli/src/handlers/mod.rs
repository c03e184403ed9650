pub mod account;
pub mod admin;
pub mod catalog;
pub mod config;
pub mod context;
pub mod loans;

pub use context::HandlerContext;
