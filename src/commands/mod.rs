//! Command units and the registry that finds and runs them
//!
//! A command unit is a script file in the commands directory. Its file stem is the
//! command identifier, its leading comment block or docstring is the description shown
//! in the menu, and its `#!` line (or an interpreter configured for its extension) is
//! the entry used to run it.
//!
//! The registry scans the directory once per discovery pass and resolves identifiers
//! against that scan when describing or invoking units.

pub mod describe;
pub mod entry;
pub mod registry;
pub mod unit;
