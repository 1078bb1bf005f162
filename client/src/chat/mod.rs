//! Chat domain: conversations, messages, and the polling client that keeps
//! the selected conversation approximately fresh.

pub mod models;
pub mod poller;
