//! Policy selection: ordered dominance rules over a content signature.

pub mod rules;
pub mod selector;

pub use rules::{select_by_rules, Rule, Selection};
pub use selector::PolicySelector;
