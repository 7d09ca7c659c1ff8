//! Client API
//!
//! Exposes an open-ended command surface over one connection.
//!
//! Any verb the server understands can be issued through
//! [`Client::execute`]; the typed methods (`get`, `set`, `del`, ...) are
//! thin wrappers that add no protocol logic beyond interpreting the reply
//! shape. A `Client` owns exactly one connection: threads must each hold
//! their own handle rather than sharing one behind hidden state, which is
//! what makes the no-locks, one-request-in-flight model sound.

use crate::config::Config;
use crate::error::{LinewireError, Result};
use crate::net::Connection;
use crate::protocol::{Packet, Reply};

/// Blocking key-value store client.
///
/// Construction performs no I/O; the underlying connection opens on the
/// first request and is reused until an explicit [`close`](Self::close)
/// or a transport fault.
pub struct Client {
    conn: Connection,
}

impl Client {
    /// Create a client from a configuration. No I/O happens here.
    pub fn new(config: Config) -> Self {
        Self {
            conn: Connection::new(config),
        }
    }

    /// Create a client for the given host and port with default settings
    pub fn open(host: impl Into<String>, port: u16) -> Self {
        Self::new(Config::builder().host(host).port(port).build())
    }

    /// Whether the underlying connection is currently open
    pub fn is_connected(&self) -> bool {
        self.conn.is_connected()
    }

    /// Close the underlying connection. The next request reconnects.
    pub fn close(&mut self) {
        self.conn.close();
    }

    // -------------------------------------------------------------------------
    // Generic command entry point
    // -------------------------------------------------------------------------

    /// Issue an arbitrary named command and interpret the reply.
    ///
    /// The command name becomes the first wire argument after passing
    /// through the rename table (`delete` is the one name remapped, to the
    /// protocol verb `del`); the remaining arguments are forwarded
    /// verbatim. Statuses map as: `ok` with an empty body to
    /// [`Reply::Nil`], one body field to [`Reply::Value`], more to
    /// [`Reply::Values`]; `not_found` to [`Reply::Nil`]; anything else to
    /// [`LinewireError::Command`].
    pub fn execute<A: AsRef<[u8]>>(&mut self, command: &str, args: &[A]) -> Result<Reply> {
        let verb = resolve_verb(command);

        let mut staged: Vec<&[u8]> = Vec::with_capacity(args.len() + 1);
        staged.push(verb.as_bytes());
        for arg in args {
            staged.push(arg.as_ref());
        }

        let packet = self.conn.request(&staged)?;
        interpret(packet, verb)
    }

    // -------------------------------------------------------------------------
    // Typed convenience commands
    // -------------------------------------------------------------------------

    /// Fetch a value by key. Returns `Ok(None)` when the key is absent.
    pub fn get(&mut self, key: impl AsRef<[u8]>) -> Result<Option<Vec<u8>>> {
        match self.execute("get", &[key.as_ref()])? {
            Reply::Value(value) => Ok(Some(value)),
            Reply::Nil => Ok(None),
            other => Err(unexpected("get", &other)),
        }
    }

    /// Set a value for a key
    pub fn set(&mut self, key: impl AsRef<[u8]>, value: impl AsRef<[u8]>) -> Result<()> {
        self.execute("set", &[key.as_ref(), value.as_ref()])?;
        Ok(())
    }

    /// Delete a key
    pub fn del(&mut self, key: impl AsRef<[u8]>) -> Result<()> {
        self.execute("del", &[key.as_ref()])?;
        Ok(())
    }

    /// Whether a key exists
    pub fn exists(&mut self, key: impl AsRef<[u8]>) -> Result<bool> {
        match self.execute("exists", &[key.as_ref()])? {
            Reply::Value(value) => Ok(value == b"1"),
            Reply::Nil => Ok(false),
            other => Err(unexpected("exists", &other)),
        }
    }

    /// Increment the integer value stored at `key` by `delta`, returning
    /// the new value
    pub fn incr(&mut self, key: impl AsRef<[u8]>, delta: i64) -> Result<i64> {
        let delta = delta.to_string();
        match self.execute("incr", &[key.as_ref(), delta.as_bytes()])? {
            Reply::Value(value) => std::str::from_utf8(&value)
                .ok()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| {
                    LinewireError::UnexpectedReply(format!(
                        "incr returned non-integer value '{}'",
                        String::from_utf8_lossy(&value)
                    ))
                }),
            other => Err(unexpected("incr", &other)),
        }
    }

    /// Range scan over `(key_start, key_end]`, returning up to `limit`
    /// key/value pairs in key order
    pub fn scan(
        &mut self,
        key_start: impl AsRef<[u8]>,
        key_end: impl AsRef<[u8]>,
        limit: usize,
    ) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        let limit = limit.to_string();
        let reply = self.execute(
            "scan",
            &[key_start.as_ref(), key_end.as_ref(), limit.as_bytes()],
        )?;

        // The body alternates key, value, key, value, ...
        let values = reply.into_values();
        if values.len() % 2 != 0 {
            return Err(LinewireError::UnexpectedReply(format!(
                "scan returned {} fields, expected an even number",
                values.len()
            )));
        }

        let mut pairs = Vec::with_capacity(values.len() / 2);
        let mut iter = values.into_iter();
        while let (Some(key), Some(value)) = (iter.next(), iter.next()) {
            pairs.push((key, value));
        }
        Ok(pairs)
    }
}

/// Static rename table: method names that differ from their protocol verb
fn resolve_verb(command: &str) -> &str {
    match command {
        "delete" => "del",
        other => other,
    }
}

/// Map a decoded packet onto the reply shape or a command rejection
fn interpret(packet: Packet, verb: &str) -> Result<Reply> {
    match packet.status() {
        b"ok" => {
            let mut fields = packet.into_fields();
            fields.remove(0);
            Ok(match fields.len() {
                0 => Reply::Nil,
                1 => match fields.pop() {
                    Some(value) => Reply::Value(value),
                    None => Reply::Nil,
                },
                _ => Reply::Values(fields),
            })
        }
        b"not_found" => Ok(Reply::Nil),
        _ => {
            let mut fields = packet.into_fields();
            let status = fields.remove(0);
            Err(LinewireError::Command {
                status,
                body: fields,
                command: verb.as_bytes().to_vec(),
            })
        }
    }
}

fn unexpected(verb: &str, reply: &Reply) -> LinewireError {
    LinewireError::UnexpectedReply(format!("{} returned {:?}", verb, reply))
}
