//! # Query Compiler
//!
//! Turns untyped request parameters into a validated [`QueryPlan`] a
//! store can execute.
//!
//! Components, leaf to root:
//! - [`FieldSelector`]: `select`, permissive whitelist
//! - [`RelationIncluder`]: `include`, strict whitelist
//! - [`OrderCompiler`]: `order_by`
//! - [`RangeCompiler`]: `price`, `stock`
//! - [`CategoryResolver`]: `category`, through a [`CategoryLookup`]
//! - [`FilterCompiler`]: all of the above for one [`EntityProfile`]

pub mod category;
pub mod compiler;
pub mod errors;
pub mod include;
pub mod order;
pub mod params;
pub mod plan;
pub mod profile;
pub mod range;
pub mod selector;

pub use category::{CategoryLookup, CategoryResolver};
pub use compiler::FilterCompiler;
pub use errors::{CompileError, CompileResult};
pub use include::RelationIncluder;
pub use order::{Direction, OrderCompiler, OrderToken};
pub use params::{ParamValue, RawParams};
pub use plan::{Projection, QueryPlan, Relations};
pub use profile::{EntityProfile, PRODUCT, SWIPER};
pub use range::{Bound, NumericKind, RangeCompiler, RangeOp, RangePredicate, RangeToken};
pub use selector::{FieldSelector, WhitelistMode};
