//! # linewire
//!
//! A blocking TCP client for a length-prefixed, line-oriented key-value
//! wire protocol, with:
//! - Block-framed request serialization (binary-safe payloads)
//! - An incremental, resumable response parser tolerant of arbitrary
//!   stream fragmentation
//! - Lazy connect, connection reuse, and reconnect after faults
//! - An open command surface: any verb the server understands works
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Client                                │
//! │        execute("get", ...) / typed wrappers                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ stages [verb, args...]
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Connection                              │
//! │      lazy connect · serialize · send · read loop             │
//! └──────────┬──────────────────────────────────────▲───────────┘
//!            │ bytes out                  raw chunks │
//!            ▼                                       │
//!     ┌─────────────┐                        ┌───────┴──────┐
//!     │   Codec     │                        │ PacketParser │
//!     │  (encode)   │                        │ (reassemble) │
//!     └─────────────┘                        └──────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;

pub mod client;
pub mod net;
pub mod protocol;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use client::Client;
pub use config::Config;
pub use error::{LinewireError, Result};
pub use protocol::{Packet, PacketParser, Reply};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of linewire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
