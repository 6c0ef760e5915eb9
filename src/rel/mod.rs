mod agg;
mod aggregation_operator;
mod filter_op;
mod project_op;
mod rel_runner;
mod tandem_op;

use std::fmt;

use crate::engine::data_types::Tuple;
use crate::errors::*;

pub use self::agg::{decode_aggs, Agg, BoxedAgg};
pub use self::aggregation_operator::{GroupedAggOp, UngroupedAggOp};
pub use self::filter_op::FilterOp;
pub use self::project_op::ProjectOp;
pub use self::rel_runner::RelRunner;
pub use self::tandem_op::TandemOp;

pub type BoxedRelOp = Box<dyn RelOp>;

/// A push/pull stage of a relational pipeline.
///
/// `put` hands a row to the stage, which either passes a row on immediately or keeps it.
/// `get` pulls rows the stage has been holding back. Both return `None` when there is
/// nothing to emit.
pub trait RelOp: fmt::Debug + Send {
    fn put(&mut self, tuple: Tuple) -> QueryResult<Option<Tuple>>;
    fn get(&mut self) -> QueryResult<Option<Tuple>>;
    fn display_op(&self) -> String;
}
