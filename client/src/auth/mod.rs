//! Authentication module for session state and identity handling.
//!
//! This module provides the public interface for authentication-related
//! functionality: the decoded Identity model, the login payload, and the
//! process-wide `SessionStore` that owns login, logout, and restore.

pub mod models;
pub mod session;
