mod canonicalize_strings;
mod deduplicate_selections;
mod drop_redundant_type_conditions;
mod flatten_selections;
mod inline_fragment_spreads;

pub use canonicalize_strings::canonicalize_strings;
pub use deduplicate_selections::deduplicate_selections;
pub use drop_redundant_type_conditions::drop_redundant_type_conditions;
pub use flatten_selections::flatten_selections;
pub use inline_fragment_spreads::inline_fragment_spreads;
