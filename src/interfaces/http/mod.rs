//! HTTP REST API
//!
//! - `common`: response envelope, error mapping, tenant extraction
//! - `modules`: per-resource dto/handlers pairs
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::create_api_router;
