//! # ws-upgrade: client-side WebSocket opening handshake
//!
//! Builds the HTTP/1.1 upgrade request sent to a WebSocket server and
//! validates the status line and headers of the server's reply.
//!
//! The byte-stream transport and the HTTP response reader are external
//! collaborators: this crate hands you the request bytes to write to the
//! socket and consumes the already-parsed status line and header map that
//! come back. It does not frame, mask, or verify `Sec-WebSocket-Accept`.
//!
//! ## Example
//!
//! ```
//! use ws_upgrade::ClientHandshake;
//!
//! let handshake = ClientHandshake::builder("/chat")
//!     .host("server.example.com")
//!     .port(8080)
//!     .protocol("chat")
//!     .build();
//!
//! let request = handshake.to_bytes();
//! // Write `request` to the socket, read the server's reply, then:
//! //
//! //   ws_upgrade::verify_status_line(&status_line)?;
//! //   ws_upgrade::verify_headers(&headers)?;
//! ```

pub mod error;
pub mod handshake;
pub mod nonce;

pub use error::{Error, Result};
pub use handshake::{verify_headers, verify_status_line, ClientHandshake, ClientHandshakeBuilder};

/// WebSocket protocol version sent in `Sec-WebSocket-Version` (RFC 6455)
pub const WS_VERSION: &str = "13";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::handshake::{
        verify_headers, verify_status_line, ClientHandshake, ClientHandshakeBuilder,
    };
}
