//! Sun Wallet - a TRON wallet client built around a payment submission pipeline.
//!
//! This library provides:
//! - Payment request validation (domain rules and scanned QR payloads)
//! - Transaction building against the remote wallet API
//! - A submission coordinator with optimistic local persistence and
//!   compensating rollback
//! - Local transaction history storage

pub mod config;
pub mod domain;
pub mod infra;
