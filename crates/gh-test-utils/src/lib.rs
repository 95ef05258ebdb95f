//! Shared test utilities for the github-mcp-server workspace.
//!
//! This crate provides standardised test fixtures so the collaborator and
//! server test suites build git state the same way. It is a dev-dependency
//! only, never published.
//!
//! # Modules
//!
//! - [`git`] - git repository fixtures at three realism levels
//! - [`remote`] - [`RemotePair`], a working clone wired to a local bare remote

pub mod git;
pub mod remote;
