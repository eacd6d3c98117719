// Backend API layer: wire types and the HTTP transport.

pub mod client;
pub mod models;

pub use client::{Backend, HttpClient, TransportError};
