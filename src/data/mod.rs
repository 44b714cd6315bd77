//! Data reading and representation.
//!
//! This module defines the read-only [`DataSource`] contract, the in-memory
//! [`Variable`] it produces, and the netCDF implementation of the contract.

mod reader;
mod source;
mod variable;

pub use reader::NetcdfSource;
pub use source::{DataSource, MemorySource};
pub use variable::{finite_min_max, format_label, Coordinate, Variable};
