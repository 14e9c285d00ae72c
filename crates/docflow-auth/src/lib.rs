// SPDX-FileCopyrightText: 2026 DocFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication primitives for the DocFlow HR backend.
//!
//! JWT claims with typed required fields and an open extension map, a
//! token service for issuing/decoding access and refresh tokens, and role
//! gating helpers. The HTTP-facing resolver (header extraction, anonymous
//! fallback) lives in the gateway crate; everything here is
//! transport-agnostic.

pub mod claims;
pub mod token;

pub use claims::{Claims, TokenType, authorize_roles, verify_token_type};
pub use token::TokenService;
