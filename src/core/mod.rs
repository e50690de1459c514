//! # Core Application Logic
//!
//! This module contains the tutoring app's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No UI. Timers are      │
//!                    │  returned as Effects.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`navigation`]: Routes and the Cours drill-down stack
//! - [`chat`]: One open lesson/student conversation
//! - [`catalog`]: Shop filtering and home search
//! - [`fixtures`]: Demo data
//! - [`attachment`]: File prompt classification
//! - [`config`]: Layered settings

pub mod action;
pub mod attachment;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod fixtures;
pub mod model;
pub mod navigation;
pub mod state;
