//! Core calculation logic for Accrual.
//!
//! This crate contains pure calculation logic with ZERO web dependencies.
//! Rate normalization, the monthly accrual recurrence, and the tax tiers
//! live here.
//!
//! # Modules
//!
//! - `simulation` - Compound-interest projections with and without tax

pub mod simulation;
