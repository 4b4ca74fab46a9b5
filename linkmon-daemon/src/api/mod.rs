//! HTTP ingestion and query surface.

mod server;

pub use server::serve;
