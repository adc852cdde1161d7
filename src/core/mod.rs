//! # Core Application Logic
//!
//! Application-level settings that sit above the route model. It knows
//! nothing about any specific UI technology.
//!
//! ```text
//!     ~/.navroute/config.toml ──┐
//!     NAVROUTE_* env vars ──────┼──► config::resolve() ──► ResolvedConfig
//!     --root / --config ────────┘                          │
//!                                                          ├── RouteTable
//!                                                          └── breadcrumb text
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Layered TOML configuration and the route table it declares

pub mod config;
