//! Error types for nafuda-roster.

use thiserror::Error;

use nafuda_core::types::ChannelId;

/// A failed call against a [`RosterSource`](crate::RosterSource).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The platform answered with `ok: false`.
    #[error("{method} returned error '{error}'")]
    Api { method: &'static str, error: String },

    /// Non-success HTTP status (e.g. 429 rate limited, 5xx).
    #[error("{method} failed with HTTP {status}")]
    Status { method: &'static str, status: u16 },

    /// Connection, TLS, DNS or timeout failure.
    #[error("{method} transport error: {message}")]
    Transport { method: &'static str, message: String },

    /// The response body was not the expected JSON shape.
    #[error("{method} returned an unreadable body: {message}")]
    Decode { method: &'static str, message: String },
}

/// Fatal errors from [`resolve`](crate::resolve). Per-member failures are not here:
/// they are recorded in the `RunReport` instead.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The membership of the channel could not be enumerated.
    #[error("cannot list members of channel {channel}: {source}")]
    Listing {
        channel: ChannelId,
        #[source]
        source: SourceError,
    },

    /// The source handed back a cursor it had already returned.
    #[error("member listing for channel {channel} repeated cursor '{cursor}'")]
    PaginationLoop { channel: ChannelId, cursor: String },
}
