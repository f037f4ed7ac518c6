//! `linepool`: a shared pool of text lines with uniform without-replacement
//! sampling.
//!
//! Multiple independent clients bulk-append lines into one pool and drain it
//! by atomic random draws; no two callers ever receive the same line
//! instance, and a failed draw removes nothing.
//!
//! Exposed modules:
//! - `pool`: the sampling cache engine ([`LinePool`]) and its concurrent
//!   handle ([`SharedPool`]).
//! - `lines`: line-boundary splitting of uploaded text bodies.
//! - `server`: axum HTTP shell exposing load / sample / reset.
//! - `client`: reqwest client for the HTTP shell.

#![forbid(unsafe_code)]

pub mod client;
pub mod lines;
pub mod pool;
pub mod server;

pub use client::{ClientError, PoolClient};
pub use lines::split_lines;
pub use pool::{LinePool, SampleError, SharedPool};
pub use server::{router, serve};
