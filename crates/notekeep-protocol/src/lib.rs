//! Wire protocol for the Notekeep API.
//!
//! This crate defines what the client and the remote backend exchange:
//!
//! - **Types** ([`Token`], [`User`], [`Credentials`], [`LoginResponse`], etc.)
//!   — the request and response bodies of the auth endpoints.
//! - **Endpoints** ([`Endpoint`]) — the path/method table the client calls.
//! - **Codec** ([`encode_body`], [`decode_body`]) — JSON body encoding.
//! - **Errors** ([`ProtocolError`]) — what can go wrong while decoding.
//!
//! # Architecture
//!
//! The protocol layer knows nothing about HTTP clients, storage, or session
//! state. It only knows the shape of the messages.
//!
//! ```text
//! Store (token slot) ─┐
//!                     ├→ Session (state machine) → Router (guard, shell)
//! Api (HTTP) ─────────┘
//!      ↑
//! Protocol (this crate)
//! ```

mod codec;
mod endpoint;
mod error;
mod types;

pub use codec::{decode_body, encode_body};
pub use endpoint::Endpoint;
pub use error::ProtocolError;
pub use types::{
    AuthCheckResponse, Credentials, ErrorBody, LoginResponse, Registration,
    Token, User, UserId,
};
