//! Network Module
//!
//! Blocking TCP transport for the client.
//!
//! ## Architecture
//! - One socket per `Connection`, opened lazily on first request
//! - Strictly one request in flight per connection (half-duplex)
//! - Any transport or framing fault collapses back to disconnected

mod connection;

pub use connection::Connection;
