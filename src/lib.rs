//! Widget service: a concurrent in-memory store of layered rectangles kept in
//! a collision-free z-order, served over a small REST API.

pub mod config;
pub mod routes;
pub mod services;
pub mod state;
