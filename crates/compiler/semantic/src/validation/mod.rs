//! # Semantic Validation Framework
//!
//! Validators inspect single syntax nodes and report diagnostics. The
//! [`ValidatorRegistry`] dispatches each node to the validators registered
//! for its kind.

pub mod assignment_validator;
pub mod binary_expr_validator;
pub mod call_validator;
pub mod validator;

pub use assignment_validator::AssignmentValidator;
pub use binary_expr_validator::BinaryExprValidator;
pub use call_validator::CallValidator;
pub use validator::{create_default_registry, Validator, ValidatorRegistry};
