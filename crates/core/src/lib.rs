//! Core logic for the roster service.
//!
//! This crate contains the domain types, the repository traits that storage
//! backends implement, and the engines that keep the Students/Teachers/
//! Registrations collections mutually consistent on top of a store that
//! offers no cross-collection enforcement.

pub mod roster;
pub mod storage;
