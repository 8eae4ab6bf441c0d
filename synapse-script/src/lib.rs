//! # synapse-script — embedded script execution
//!
//! The local strategy for running knowledge objects: compile a [rhai]
//! artifact in-process and call a named entry function, under the same
//! [`Adapter`](synapse_api::Adapter)/[`Executor`](synapse_api::Executor)
//! contract the remote proxy implements.
//!
//! Compilation happens once, at activation. Each call then evaluates
//! the compiled script into a scope allocated for that call alone, so
//! one executor serves any number of concurrent callers and no state
//! leaks between invocations.
//!
//! [rhai]: https://rhai.rs

#![deny(missing_docs)]

mod adapter;
mod executor;

pub use adapter::ScriptAdapter;
pub use executor::ScriptExecutor;
