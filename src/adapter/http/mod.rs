//! HTTP plumbing shared by the remote repositories

pub mod client;
pub mod models;
pub mod response;
pub mod transfer;

pub use client::ApiClient;
