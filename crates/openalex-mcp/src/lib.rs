//! OpenAlex MCP Server
//!
//! A Model Context Protocol (MCP) server for the OpenAlex scholarly catalog.
//! Enables LLM agents to search works, authors, institutions and the rest of
//! the OpenAlex entity kinds, walk citation networks, and analyze
//! collaborations.
//!
//! # Features
//!
//! - **13 MCP tools**: discovery, enrichment, citation networks, bibliometrics
//! - **Async-first**: built on Tokio with bounded fan-out for id resolution
//! - **Resilient**: capped exponential backoff with observable attempt counts
//! - **Cached**: bounded FIFO response cache with 5-minute TTL
//! - **Polite**: sends the configured contact email on every request
//!
//! # Example
//!
//! ```no_run
//! use openalex_mcp::{client::OpenAlexClient, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = OpenAlexClient::new(config)?;
//!
//!     // Use client for API calls
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod server;
pub mod tools;

pub use client::OpenAlexClient;
pub use config::Config;
pub use error::{ClientError, ToolError};
