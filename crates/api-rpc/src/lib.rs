//! JSON-RPC API Layer
//!
//! Implements the JSON-RPC 2.0 server for the Eshop catalog: product
//! listing and creation, synchronous stock updates and the queued
//! (fire-and-forget) stock update producer.

pub mod error;
pub mod handler;
pub mod server;
pub mod types;

pub use server::{RpcServer, RpcServerConfig};
