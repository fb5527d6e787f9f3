//! Core business logic for episodic.
//!
//! Transfer objects and their conversions, the unit-of-work CRUD templates,
//! one service per entity category, and access-token issuance.

pub mod convert;
pub mod services;
pub mod token;
pub mod transfer;

pub use services::*;
pub use token::{Claims, TokenIssuer};
