//! Client subsystem for the PawHaven cat adoption marketplace.
//!
//! This crate is the session and role-routing core a UI host embeds: it
//! decodes bearer tokens into identities, keeps process-wide session state
//! backed by durable token storage, maps roles to their dashboards, and runs
//! the polling chat client. Everything talks to the marketplace REST API
//! through `api::client::ApiClient`.
//!
//! The token payload is decoded without signature verification. Routing
//! decisions made from those claims are a UX convenience only; the server
//! authorizes every API call independently, so nothing here is a security
//! boundary.

pub mod api;
pub mod auth;
pub mod chat;
pub mod config;
pub mod errors;
pub mod routing;
pub mod storage;
pub mod utils;
