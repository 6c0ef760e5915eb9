use crate::engine::data_types::*;
use crate::engine::execution::Runner;
use crate::errors::*;
use crate::rel::RelOp;

/// Passes through rows for which the predicate evaluates to true. False and null reject.
#[derive(Debug)]
pub struct FilterOp {
    predicate: Runner,
}

impl FilterOp {
    pub fn new(predicate: Runner) -> FilterOp {
        FilterOp { predicate }
    }
}

impl RelOp for FilterOp {
    fn put(&mut self, tuple: Tuple) -> QueryResult<Option<Tuple>> {
        let (result, tuple) = self.predicate.eval(tuple)?;
        match result {
            Operand::Bool(true) => Ok(Some(tuple)),
            Operand::Bool(false) | Operand::Null => Ok(None),
            other => Err(fatal!("Filter predicate returned {:?}", other)),
        }
    }

    fn get(&mut self) -> QueryResult<Option<Tuple>> {
        Ok(None)
    }

    fn display_op(&self) -> String {
        format!("filter({})", self.predicate.operators())
    }
}
