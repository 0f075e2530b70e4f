//! Generators for SQL fixtures that fill a `vectors` table.
//!
//! Two independent generators live here:
//!
//! - [`dense::DenseGenerator`] emits `vector32('[...]')` literals of
//!   uniformly drawn floats.
//! - [`sparse::SparseGenerator`] emits `x'...'` literals holding a
//!   [`sparse::SparseVector`] in the format-9 binary layout.
//!
//! Both own a seeded [`rng::FixtureRng`], so a given set of parameters
//! always produces the same bytes.
pub mod dense;
pub mod error;
pub mod params;
pub mod rng;
pub mod sparse;
pub mod sql;
pub mod util;

pub use error::FixtureError;
