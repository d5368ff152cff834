//! # Four in a Row
//!
//! A referee for four-in-a-row matches between two external strategy
//! programs. The referee owns the rules (legality, turn order, win and draw
//! detection) and talks to each strategy over a line protocol on its standard
//! streams.
//!
//! ## Modules
//!
//! - [`game`] — Board model with a sentinel ring, players, rules engine
//! - [`protocol`] — Request and reply line codec
//! - [`strategy`] — `Strategy` trait and the child-process adapter
//! - [`referee`] — Match driver and match reports
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod protocol;
pub mod referee;
pub mod strategy;
