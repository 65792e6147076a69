//! API handlers for the chess server.

pub mod games;
