//! Classbook - Class Booking Backend
//!
//! This crate implements the reservation core of a class-booking system:
//! capacity-safe seat booking, class lifecycle management, and the booking
//! ledger, behind persistence and event ports.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
