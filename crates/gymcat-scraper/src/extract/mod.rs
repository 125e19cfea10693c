//! Heuristic extraction of catalog fields from product titles and copy.
//!
//! Every rule is an independent pure function. Callers compose them with
//! first-match-wins semantics; none of them fail, they simply return `None`
//! or an empty list when the copy does not cooperate.

mod benefits;
mod flavour;
mod ingredients;
mod nutrition;
mod product_type;

pub use benefits::extract_benefits;
pub use flavour::extract_flavour;
pub use ingredients::extract_ingredients;
pub use nutrition::extract_nutrition;
pub use product_type::infer_product_type;
