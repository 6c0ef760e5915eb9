use crate::engine::data_types::*;
use crate::errors::*;
use crate::rel::{BoxedRelOp, RelOp};

/// Runs `input` and feeds whatever it emits into `output`.
#[derive(Debug)]
pub struct TandemOp {
    input: BoxedRelOp,
    output: BoxedRelOp,
}

impl TandemOp {
    pub fn boxed(input: BoxedRelOp, output: BoxedRelOp) -> BoxedRelOp {
        Box::new(TandemOp { input, output })
    }
}

impl RelOp for TandemOp {
    fn put(&mut self, tuple: Tuple) -> QueryResult<Option<Tuple>> {
        match self.input.put(tuple)? {
            Some(tuple) => self.output.put(tuple),
            None => Ok(None),
        }
    }

    /// Drains `input` through `output` first, so buffering stages upstream flush downstream.
    fn get(&mut self) -> QueryResult<Option<Tuple>> {
        while let Some(tuple) = self.input.get()? {
            if let Some(tuple) = self.output.put(tuple)? {
                return Ok(Some(tuple));
            }
        }
        self.output.get()
    }

    fn display_op(&self) -> String {
        format!("{} | {}", self.input.display_op(), self.output.display_op())
    }
}
