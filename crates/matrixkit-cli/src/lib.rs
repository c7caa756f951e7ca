//! matrixkit-cli: helpers behind the `matrixkit` binary.
//!
//! Operands are parsed from JSON or resolved from the saved-matrix store,
//! dispatched to the library, and printed back as JSON.
pub mod commands;
pub mod operand;
