use crate::engine::data_types::*;
use crate::engine::execution::Runner;
use crate::errors::*;
use crate::rel::RelOp;

/// Maps each row to the results of a multi-result program, one column per result.
#[derive(Debug)]
pub struct ProjectOp {
    projection: Runner,
}

impl ProjectOp {
    pub fn new(projection: Runner) -> ProjectOp {
        ProjectOp { projection }
    }
}

impl RelOp for ProjectOp {
    fn put(&mut self, tuple: Tuple) -> QueryResult<Option<Tuple>> {
        self.projection.bind_tuple(tuple);
        let result = self.projection.run();
        self.projection.unbind_tuple();
        result?;
        Ok(Some(self.projection.take_all()))
    }

    fn get(&mut self) -> QueryResult<Option<Tuple>> {
        Ok(None)
    }

    fn display_op(&self) -> String {
        format!("project({})", self.projection.operators())
    }
}
