// Each page of the MonLivre web client maps to one command group:
// `loans` is the student dashboard, `catalog` the public catalog, `admin` the
// administration console. Commands are one-shot: every run loads fresh data
// from the backend, performs at most one action, and prints the resulting view
// together with the notifications that action produced.

mod args;
mod commands;
mod handlers;
mod logging;
pub mod presentation;
pub mod types;

pub use args::{
    AdminCommand, BookCommand, BookFields, CatalogCommand, Cli, Commands, LoanCommand, StudentCommand,
    ViewModeArgs,
};
pub use commands::run;
