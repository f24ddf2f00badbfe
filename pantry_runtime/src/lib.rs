//! # Pantry Runtime
//!
//! `pantry_runtime` wires the stores and the capability core into the
//! services a front end calls: session management and identity
//! resolution, account flows (registration, login, confirmation,
//! profiles, admin user management), and gated recipe CRUD.
//!
//! Every protected operation goes through the request's
//! [`RequestContext`](pantry_capability::RequestContext): the capability
//! set is derived once per request and checked before any mutation.

pub mod account;
pub mod config;
pub mod mail;
pub mod password;
pub mod recipes;
pub mod session;
pub mod token;

pub use account::{AccountService, ConfirmOutcome};
pub use config::RuntimeConfig;
pub use mail::{LogMailSender, MailSender};
pub use recipes::{RecipeDraft, RecipeService};
pub use session::SessionManager;
pub use token::ConfirmationTokens;
