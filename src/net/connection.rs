//! Connection handling
//!
//! Owns one socket and drives one request/response cycle at a time.

use std::io::{ErrorKind, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};

use crate::config::Config;
use crate::error::{LinewireError, Result};
use crate::protocol::{encode_request, Packet, PacketParser};

/// A single client connection: socket, parser, and reusable buffers.
///
/// The connection is a two-state machine, `disconnected` or `connected`.
/// `request` connects lazily, and every transport or framing fault tears
/// the connection down before the error propagates so a desynchronized
/// stream can never be reused. Taking `&mut self` for the whole cycle is
/// what enforces the one-request-in-flight discipline: the first packet
/// decoded after a send is unambiguously that request's reply.
pub struct Connection {
    /// Client configuration (address, timeouts, buffer sizing)
    config: Config,

    /// Live socket, or `None` while disconnected
    stream: Option<TcpStream>,

    /// Incremental response parser; cleared on every teardown
    parser: PacketParser,

    /// Reusable serialization buffer for outgoing requests
    send_buf: Vec<u8>,

    /// Fixed-size receive chunk
    recv_buf: Vec<u8>,
}

impl Connection {
    /// Create a disconnected connection. No I/O happens until the first
    /// request.
    pub fn new(config: Config) -> Self {
        let recv_buf = vec![0u8; config.read_chunk_size];
        Self {
            config,
            stream: None,
            parser: PacketParser::new(),
            send_buf: Vec::new(),
            recv_buf,
        }
    }

    /// Whether a socket is currently open
    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Open the TCP stream and install a fresh parser.
    ///
    /// Applies the configured connect/read/write timeouts and disables
    /// Nagle's algorithm for low latency.
    pub fn connect(&mut self) -> Result<()> {
        let addr = self.config.addr();
        let stream = match self.config.connect_timeout {
            Some(timeout) => connect_with_timeout(&addr, timeout)?,
            None => TcpStream::connect(addr.as_str()).map_err(|source| {
                LinewireError::Connect {
                    addr: addr.clone(),
                    source,
                }
            })?,
        };

        stream.set_nodelay(true)?;
        stream.set_read_timeout(self.config.read_timeout)?;
        stream.set_write_timeout(self.config.write_timeout)?;

        self.parser.clear();
        self.stream = Some(stream);

        tracing::debug!("connected to {}", addr);
        Ok(())
    }

    /// Tear down the connection. Idempotent; safe to call while already
    /// closed.
    pub fn close(&mut self) {
        self.parser.clear();
        if self.stream.take().is_some() {
            tracing::debug!("connection to {} closed", self.config.addr());
        }
    }

    /// Run one full request/response cycle for the staged arguments.
    ///
    /// Connects lazily when disconnected. On any fault other than a
    /// server-side command rejection the connection is closed before the
    /// error is returned.
    pub fn request<A: AsRef<[u8]>>(&mut self, args: &[A]) -> Result<Packet> {
        if self.stream.is_none() {
            self.connect()?;
        }

        self.send_buf.clear();
        encode_request(args, &mut self.send_buf);

        let result = self.exchange();
        if let Err(ref err) = result {
            if err.is_fatal() {
                tracing::warn!("request failed, closing connection: {}", err);
                self.close();
            }
        }
        result
    }

    /// Send the serialized request and block until one packet decodes.
    fn exchange(&mut self) -> Result<Packet> {
        let stream = self.stream.as_mut().ok_or_else(|| {
            LinewireError::Io(std::io::Error::new(
                ErrorKind::NotConnected,
                "request on a closed connection",
            ))
        })?;

        // write_all retries partial writes internally.
        stream.write_all(&self.send_buf)?;
        tracing::trace!("sent {} byte request", self.send_buf.len());

        loop {
            let count = stream.read(&mut self.recv_buf)?;
            if count == 0 {
                // Peer closed the socket mid-cycle.
                return Err(LinewireError::RemoteClosed);
            }
            self.parser.feed(&self.recv_buf[..count]);
            if let Some(packet) = self.parser.try_next()? {
                tracing::trace!(
                    "decoded packet with status '{}'",
                    String::from_utf8_lossy(packet.status())
                );
                return Ok(packet);
            }
        }
    }
}

/// Resolve `addr` and attempt each resolved address with the given timeout
fn connect_with_timeout(addr: &str, timeout: std::time::Duration) -> Result<TcpStream> {
    let sock_addrs = addr.to_socket_addrs().map_err(|source| LinewireError::Connect {
        addr: addr.to_string(),
        source,
    })?;

    let mut last_err = None;
    for sock_addr in sock_addrs {
        match TcpStream::connect_timeout(&sock_addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(err) => last_err = Some(err),
        }
    }

    Err(LinewireError::Connect {
        addr: addr.to_string(),
        source: last_err.unwrap_or_else(|| {
            std::io::Error::new(ErrorKind::AddrNotAvailable, "no addresses resolved")
        }),
    })
}
