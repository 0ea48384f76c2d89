//! MEI-Mentor Client Library
//!
//! Client side of the MEI-Mentor lead-qualification tool: looks up the
//! opportunity analysis for a CPF on the backend and renders it, together with
//! the account hub mock-ups, as terminal text.
//!
//! # Modules
//!
//! - `api_client`: HTTP client with error normalization.
//! - `config`: Configuration management.
//! - `controller`: View state machine (query lifecycle, screens, overlays).
//! - `cpf`: CPF parsing, validation and input masking.
//! - `errors`: Error handling types.
//! - `models`: Wire data models.
//! - `opportunity`: Opportunity analysis query service.
//! - `session`: Line-driven interaction for the terminal session.
//! - `view`: Classifications, pt-BR formatting and text renderers.

pub mod api_client;
pub mod config;
pub mod controller;
pub mod cpf;
pub mod errors;
pub mod models;
pub mod opportunity;
pub mod session;
pub mod view;
