//! Persistent storage for the client
//!
//! The only durable client-side state is the auth token; everything else is
//! fetched from the server per screen visit.

pub mod token;

pub use token::TokenStore;
