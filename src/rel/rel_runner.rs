use crate::engine::codec::*;
use crate::engine::data_types::*;
use crate::engine::execution::Runner;
use crate::engine::opcodes::*;
use crate::errors::*;
use crate::options::Options;
use crate::rel::*;

/// A decoded relational program: a chain of stages composed with [`TandemOp`].
///
/// ```
/// use exprvm::{Operand, RelRunner};
///
/// // FILTER $0 > 1
/// let mut runner = RelRunner::new();
/// runner.decode(&[0x71, 0x31, 0x00, 0x11, 0x01, 0x93, 0x01, 0x00]).unwrap();
/// assert_eq!(runner.put(vec![Operand::Int32(1)]).unwrap(), None);
/// assert_eq!(runner.put(vec![Operand::Int32(2)]).unwrap(), Some(vec![Operand::Int32(2)]));
/// ```
#[derive(Debug)]
pub struct RelRunner {
    options: Options,
    chain: Option<BoxedRelOp>,
}

impl RelRunner {
    pub fn new() -> RelRunner {
        RelRunner::with_options(&Options::default())
    }

    pub fn with_options(options: &Options) -> RelRunner {
        RelRunner { options: options.clone(), chain: None }
    }

    /// Decodes stages until the end of `code`, appending each to the chain, and returns the
    /// number of bytes consumed.
    pub fn decode(&mut self, code: &[u8]) -> QueryResult<usize> {
        self.chain = None;
        let mut stages = 0;
        let mut p = 0;
        while p < code.len() {
            let b = p;
            let (stage, cursor): (BoxedRelOp, usize) = match code[p] {
                FILTER => {
                    let (runner, cursor) = self.decode_expression(code, p + 1)?;
                    (Box::new(FilterOp::new(runner)) as BoxedRelOp, cursor)
                }
                PROJECT => {
                    let (runner, cursor) = self.decode_expression(code, p + 1)?;
                    (Box::new(ProjectOp::new(runner)) as BoxedRelOp, cursor)
                }
                GROUPED_AGGREGATE => {
                    let (group_by, cursor) = decode_indices(code, p + 1)?;
                    let (aggs, cursor) = decode_aggs(code, cursor)?;
                    (Box::new(GroupedAggOp::new(group_by, aggs, self.options.group_capacity)) as BoxedRelOp, cursor)
                }
                UNGROUPED_AGGREGATE => {
                    let (aggs, cursor) = decode_aggs(code, p + 1)?;
                    (Box::new(UngroupedAggOp::new(aggs)) as BoxedRelOp, cursor)
                }
                _ => bail!(QueryError::UnknownCode, &code[b..]),
            };
            p = cursor;
            stages += 1;
            self.chain = Some(match self.chain.take() {
                Some(chain) => TandemOp::boxed(chain, stage),
                None => stage,
            });
        }
        log::debug!("Decoded relational program of {} stages: {}", stages, self);
        Ok(p)
    }

    fn decode_expression(&self, code: &[u8], p: usize) -> QueryResult<(Runner, usize)> {
        let mut runner = Runner::with_options(&self.options);
        let consumed = runner.decode(&code[p..])?;
        Ok((runner, p + consumed))
    }

    /// Pushes one row through the chain. An empty chain hands the row back unchanged.
    pub fn put(&mut self, tuple: Tuple) -> QueryResult<Option<Tuple>> {
        match self.chain {
            Some(ref mut chain) => chain.put(tuple),
            None => Ok(Some(tuple)),
        }
    }

    /// Pulls the next row buffered anywhere in the chain.
    pub fn get(&mut self) -> QueryResult<Option<Tuple>> {
        match self.chain {
            Some(ref mut chain) => chain.get(),
            None => Ok(None),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_none()
    }
}

impl Default for RelRunner {
    fn default() -> RelRunner { RelRunner::new() }
}

impl std::fmt::Display for RelRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.chain {
            Some(ref chain) => write!(f, "{}", chain.display_op()),
            None => write!(f, "identity"),
        }
    }
}

/// Varint count followed by that many varint column indices.
fn decode_indices(code: &[u8], p: usize) -> QueryResult<(Vec<usize>, usize)> {
    let (count, mut p) = decode_usize(code, p)?;
    let mut indices = Vec::with_capacity(count.min(code.len()));
    for _ in 0..count {
        let (index, cursor) = decode_usize(code, p)?;
        indices.push(index);
        p = cursor;
    }
    Ok((indices, p))
}
