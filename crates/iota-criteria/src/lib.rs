//! # iota-criteria
//!
//! Builds SQL WHERE-clause fragments from search form input.
//!
//! ```
//! use iota_criteria::SearchCriteria;
//!
//! let c = SearchCriteria::new([("name", "Smith"), ("city", "")]);
//! let filter = c.land([c.begins("name"), c.eq("city")]).unwrap();
//! assert_eq!(filter.to_string(), "name LIKE 'Smith%'");
//! ```

pub mod criteria;
pub mod error;
pub mod expr;
pub mod input;
pub mod quote;
pub mod term;

pub use criteria::SearchCriteria;
pub use error::{CriteriaError, CriteriaResult};
pub use expr::Criterion;
pub use input::InputValue;
pub use term::{Operator, Term};
