//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Protocol Format (length-prefixed text blocks)
//!
//! The atomic framing unit is the *block*: a decimal byte length, a newline,
//! that many raw payload bytes, and a trailing newline. Payloads are opaque
//! byte strings and may themselves contain newlines or NUL bytes.
//!
//! ```text
//! ┌───────────────┬────┬─────────────────┬────┐
//! │ decimal len   │ \n │     payload     │ \n │
//! └───────────────┴────┴─────────────────┴────┘
//! ```
//!
//! ### Request Format
//! A request is one block per argument (the first argument is the command
//! verb), terminated by an empty line:
//!
//! ```text
//! 3\nget\n3\nfoo\n\n
//! ```
//!
//! ### Response Format
//! Same framing. Field 0 is the status token, the remaining fields are the
//! body, and an empty line terminates the packet:
//!
//! ```text
//! 2\nok\n5\nhello\n\n
//! ```
//!
//! ### Status Tokens
//! - `ok`           - success; body holds zero or more values
//! - `not_found`    - key absent; not an error
//! - anything else  - server-side rejection (`error`, `client_error`, `fail`, ...)

mod codec;
mod packet;
mod parser;

pub use codec::encode_request;
pub use packet::{Packet, Reply};
pub use parser::{PacketParser, MAX_BLOCK_SIZE};
