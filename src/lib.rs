//! Lords of Esport - Payments Service
//!
//! This crate implements tournament-entry payment processing on top of the
//! Square payments API, behind a gateway-agnostic internal contract.

pub mod adapters;
pub mod application;
pub mod checkout;
pub mod config;
pub mod domain;
pub mod ports;
