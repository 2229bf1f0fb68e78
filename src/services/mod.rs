//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! `record` is the per-widget entity; `widget` owns the collection, id
//! generation, and z-ordering. Route handlers only translate between HTTP and
//! these types.

pub mod record;
pub mod widget;
