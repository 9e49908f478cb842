//! TUI module for the interactive shortlisting session.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (Session, Action, Transition, Ui)
//! - `update`: Pure transitions
//! - `view`: Pure rendering
//! - `run`: Effects (surface, key reading, the decision loop)

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;

pub use run::{Exit, Input, Review, Shortlister, Surface, TerminalSurface, run};
