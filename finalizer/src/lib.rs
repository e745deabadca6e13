//! # Finalizer
//!
//! Conditional, ordered cleanup for a function's exit path.
//!
//! A function binds a [`Finalizer`] to its [`ErrorSlot`], registers cleanup
//! tasks as it acquires resources, and finalizes once on the way out:
//!
//! - **Always tasks** run on every finalization, first
//! - **Success tasks** run only if the slot is empty
//! - **Failure tasks** run only if the slot holds an error, and receive it
//!
//! Each sequence runs in reverse registration order, so resources unwind
//! last-acquired first. A panicking task is caught and discarded without
//! stopping the others. Dropping the finalizer finalizes it, which covers
//! early returns and `?`.
//!
//! ## Quick Start
//!
//! ```rust
//! use finalizer::prelude::*;
//!
//! fn import(rows: &[&str]) -> Result<usize, String> {
//!     guarded(|fin| {
//!         fin.always(|| println!("closing input"));
//!         fin.on_failure(|e: &String| println!("rolling back: {e}"));
//!         fin.on_success(|| println!("committing"));
//!
//!         if rows.is_empty() {
//!             return Err("nothing to import".to_string());
//!         }
//!         Ok(rows.len())
//!     })
//! }
//!
//! assert_eq!(import(&["a", "b"]), Ok(2));
//! assert!(import(&[]).is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod combine;
pub mod config;
pub mod errors;
pub mod finalizer;
pub mod helpers;
pub mod observer;
pub mod report;
pub mod scope;
pub mod slot;
pub mod task;
pub mod testing;


pub use crate::config::{FinalizerConfig, LateRegistration};
pub use crate::errors::TaskFault;
pub use crate::finalizer::Finalizer;
pub use crate::report::{FinalizeReport, Outcome};
pub use crate::scope::{guarded, guarded_with};
pub use crate::slot::ErrorSlot;
pub use crate::task::TaskKind;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::combine::{colon_join, ErrorList};
    pub use crate::config::{FinalizerConfig, LateRegistration};
    pub use crate::errors::TaskFault;
    pub use crate::finalizer::Finalizer;
    pub use crate::observer::{
        CollectingFaultObserver, FaultObserver, LoggingFaultObserver, NoOpFaultObserver,
    };
    pub use crate::report::{FinalizeReport, Outcome};
    pub use crate::scope::{guarded, guarded_with};
    pub use crate::slot::ErrorSlot;
    pub use crate::task::TaskKind;
}
