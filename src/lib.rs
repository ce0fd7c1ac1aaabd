//! # BrainScan - A re-scanning Brainfuck interpreter and C translator
//!
//! Programs are either interpreted directly against a 30000 cell tape, or
//! translated to C for an external compiler. Both modes share the same
//! instruction classifier, so they accept exactly the same programs.
//!
//! **NOTE! This is a command line program. This library does NOT provide a
//! stable API.**

// Re-export some symbols.
pub use codegen::generate_c;
pub use context::ExecutionContext;
pub use diagnostics::Diagnostics;
pub use instruction::ParseError;
pub use interpreter::execute;
pub use interpreter::ExecuteCallbackData;
pub use interpreter::ExecuteCallbackResult;
pub use interpreter::ExecutionError;
pub use types::BfNum;
pub use types::TapeAddr;
pub use types::TapeAddrError;

mod codegen;
pub mod context;
pub mod diagnostics;
pub mod instruction;
mod interpreter;
pub mod settings;
pub mod tape;
#[doc(hidden)]
pub mod test_utils;
pub mod types;
