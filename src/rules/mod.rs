//! Game rules: what makes a set, and what makes a well-formed claim.
//!
//! Everything here is pure. Nothing in this module touches session state.

pub mod claim;
pub mod validator;

pub use claim::{ClaimPositions, ClaimRequest};
pub use validator::{
    all_same_or_all_different, combinations, count_valid_triples, enumerate_valid_triples,
    has_valid_triple, hint, is_valid_set, is_valid_triple, valid_triples, Triple,
};
