//! Default resolution, overload expansion and builder synthesis.
//!
//! The engine turns callables whose parameters declare defaults into
//! [`EmissionPlan`](defaultgen_core::EmissionPlan)s a host writer can emit:
//!
//! - [`literal`] type-checks literal default text
//! - [`resolve`] resolves field and factory references through a
//!   [`SymbolTable`](defaultgen_core::SymbolTable)
//! - [`overload`] expands defaults into an arity-descending overload set
//! - [`builder`] synthesizes a fluent builder for named mode
//! - [`discovery`] finds convention-named defaults for external types
//! - [`Generator`] runs all of the above for a whole request

pub mod builder;
pub mod discovery;
mod generator;
pub mod literal;
pub mod overload;
pub mod params;
pub mod resolve;
pub mod validate;

pub use generator::{ExternalTarget, GenerationReport, GenerationRequest, Generator, TargetOutcome};
