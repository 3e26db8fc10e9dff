//! Component selection and budgeted infection.
//!
//! This module groups the subset-sum selector and the orchestration that
//! turns a selection into per-component propagations.

pub mod infection;
pub mod selection;
