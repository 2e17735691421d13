//! Domain types for equity valuation.
//!
//! - [`ValuationMethod`]: EPS or FCF, with the metric each needs
//! - [`ValuationParams`]: Raw, possibly incomplete caller input
//! - [`ValuationInputs`]: Complete inputs in decimal form
//! - [`ValidatedInputs`]: Inputs that passed [`InputValidator`](crate::InputValidator)
//! - [`GrowthCategory`]: Growth band of an initial growth rate

mod growth;
mod inputs;
mod method;

pub use growth::GrowthCategory;
pub use inputs::{ValidatedInputs, ValuationInputs, ValuationParams};
pub use method::{MethodKind, ValuationMethod};
