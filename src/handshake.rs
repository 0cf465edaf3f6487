//! Client-side WebSocket opening handshake
//!
//! This module builds the HTTP/1.1 upgrade request and validates the
//! server's reply. Reading the response off the socket and splitting it
//! into a status line and header map happens outside this crate; the two
//! validators here are pure checks over that parsed data.

use std::collections::HashMap;

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{Error, Result};
use crate::nonce;
use crate::WS_VERSION;

/// A client opening-handshake request.
///
/// The `Sec-WebSocket-Key` nonce is generated exactly once at construction
/// and stays fixed for the lifetime of the value. Build a fresh
/// `ClientHandshake` for every connection attempt; reconnects need a new
/// nonce.
#[derive(Debug, Clone)]
pub struct ClientHandshake {
    host: Option<String>,
    port: Option<u16>,
    path: String,
    protocol: Option<String>,
    extra_headers: Vec<(String, String)>,
    nonce: String,
}

impl ClientHandshake {
    /// Create a handshake request from connection parameters.
    ///
    /// `host` defaults to `"localhost"` when `None`; `port` is omitted from
    /// the Host header when `None`. `path` is inserted verbatim into the
    /// request line; no validation or percent-encoding is performed, so a
    /// malformed path produces a malformed request rather than an error.
    pub fn new(
        host: Option<String>,
        port: Option<u16>,
        path: String,
        protocol: Option<String>,
        extra_headers: Vec<(String, String)>,
    ) -> Self {
        Self {
            host,
            port,
            path,
            protocol,
            extra_headers,
            nonce: nonce::new_nonce(),
        }
    }

    /// Create a builder for a handshake request to `path`.
    pub fn builder(path: impl Into<String>) -> ClientHandshakeBuilder {
        ClientHandshakeBuilder::new(path)
    }

    /// The request path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The base64 `Sec-WebSocket-Key` value sent with this request
    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    /// The requested subprotocol, if any
    pub fn protocol(&self) -> Option<&str> {
        self.protocol.as_deref()
    }

    /// Serialize the upgrade request for the transport.
    ///
    /// Header order is fixed: Host, Upgrade, Connection,
    /// Sec-WebSocket-Version, Sec-WebSocket-Key, Sec-WebSocket-Protocol
    /// when requested, then extra headers in caller order. This never
    /// fails; the header block is rebuilt on every call.
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(512);

        buf.put_slice(b"GET ");
        buf.put_slice(self.path.as_bytes());
        buf.put_slice(b" HTTP/1.1\r\n");

        for (name, value) in self.header_block() {
            buf.put_slice(name.as_bytes());
            buf.put_slice(b": ");
            buf.put_slice(value.as_bytes());
            buf.put_slice(b"\r\n");
        }

        buf.put_slice(b"\r\n");
        buf.freeze()
    }

    fn header_block(&self) -> Vec<(String, String)> {
        let mut host = self
            .host
            .clone()
            .unwrap_or_else(|| String::from("localhost"));
        if let Some(port) = self.port {
            host.push(':');
            host.push_str(&port.to_string());
        }

        let mut block: Vec<(String, String)> = vec![
            (String::from("Host"), host),
            (String::from("Upgrade"), String::from("websocket")),
            (String::from("Connection"), String::from("Upgrade")),
            (String::from("Sec-WebSocket-Version"), String::from(WS_VERSION)),
            (String::from("Sec-WebSocket-Key"), self.nonce.clone()),
        ];

        if let Some(protocol) = &self.protocol {
            block.push((String::from("Sec-WebSocket-Protocol"), protocol.clone()));
        }

        for (name, value) in &self.extra_headers {
            // HTTP field names are case-insensitive (RFC 9110); a caller
            // header colliding with one already emitted is dropped.
            if !block.iter().any(|(n, _)| n.eq_ignore_ascii_case(name)) {
                block.push((name.clone(), value.clone()));
            }
        }

        block
    }

    #[cfg(test)]
    fn with_nonce(
        host: Option<String>,
        port: Option<u16>,
        path: String,
        protocol: Option<String>,
        extra_headers: Vec<(String, String)>,
        nonce: String,
    ) -> Self {
        Self {
            host,
            port,
            path,
            protocol,
            extra_headers,
            nonce,
        }
    }
}

/// Builder for a [`ClientHandshake`]
///
/// The nonce is generated by [`build`](ClientHandshakeBuilder::build), so
/// a builder can be cloned and built repeatedly to get independent
/// handshake attempts.
#[derive(Debug, Clone)]
pub struct ClientHandshakeBuilder {
    host: Option<String>,
    port: Option<u16>,
    path: String,
    protocol: Option<String>,
    extra_headers: Vec<(String, String)>,
}

impl ClientHandshakeBuilder {
    fn new(path: impl Into<String>) -> Self {
        Self {
            host: None,
            port: None,
            path: path.into(),
            protocol: None,
            extra_headers: Vec::new(),
        }
    }

    /// Set the Host header value (defaults to "localhost")
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Append `:port` to the Host header
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Request a subprotocol via `Sec-WebSocket-Protocol`
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Append an extra header; emitted after the protocol-mandated
    /// headers, in insertion order
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    /// Build the handshake request, generating its nonce
    pub fn build(self) -> ClientHandshake {
        ClientHandshake::new(
            self.host,
            self.port,
            self.path,
            self.protocol,
            self.extra_headers,
        )
    }
}

/// Validate the status line of the server's handshake response.
///
/// Reads the 3-digit status code immediately following `HTTP/1.1 `
/// (byte offset 9..12). 101 means the upgrade was accepted; 407 and 404
/// map to dedicated errors, everything else to
/// [`Error::UnexpectedStatus`]. A line too short to carry a code, or with
/// a non-numeric code, fails with [`Error::MalformedStatusLine`].
pub fn verify_status_line(status_line: &str) -> Result<()> {
    let code = status_line
        .get(9..12)
        .filter(|digits| digits.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|digits| digits.parse::<u16>().ok())
        .ok_or(Error::MalformedStatusLine)?;

    match code {
        101 => Ok(()),
        407 => Err(Error::ProxyAuthRequired),
        404 => Err(Error::NotFound),
        other => Err(Error::UnexpectedStatus(other)),
    }
}

/// Validate the headers of the server's handshake response.
///
/// `upgrade` must equal "websocket" and `connection` must equal "upgrade",
/// both compared case-insensitively and looked up case-insensitively. An
/// absent field is reported as the same [`Error::MissingOrInvalidHeader`]
/// as a wrong value. No other headers are inspected;
/// `Sec-WebSocket-Accept` in particular is not checked against the nonce.
pub fn verify_headers(headers: &HashMap<String, String>) -> Result<()> {
    let upgrade =
        header_value(headers, "upgrade").ok_or(Error::MissingOrInvalidHeader("upgrade"))?;
    if !upgrade.eq_ignore_ascii_case("websocket") {
        return Err(Error::MissingOrInvalidHeader("upgrade"));
    }

    let connection =
        header_value(headers, "connection").ok_or(Error::MissingOrInvalidHeader("connection"))?;
    if !connection.eq_ignore_ascii_case("upgrade") {
        return Err(Error::MissingOrInvalidHeader("connection"));
    }

    Ok(())
}

fn header_value<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(field, _)| field.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
