//! Progress Tracker App Library
//!
//! Screen logic for the home dashboard and the weigh-in report screen,
//! plus the ports and adapters that connect them to the hosted backend.

pub mod adapters;
pub mod auth;
pub mod config;
pub mod error;
pub mod ports;
pub mod repositories;
pub mod screens;
pub mod services;
pub mod state;
