use crate::engine::data_types::*;
use crate::errors::*;

/// Value stack of one expression, optionally bound to the row it evaluates.
#[derive(Debug, Default)]
pub struct OperandStack {
    values: Vec<Operand>,
    tuple: Option<Tuple>,
}

impl OperandStack {
    pub fn with_capacity(capacity: usize) -> OperandStack {
        OperandStack {
            values: Vec::with_capacity(capacity),
            tuple: None,
        }
    }

    pub fn clear(&mut self) { self.values.clear() }

    pub fn len(&self) -> usize { self.values.len() }

    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    pub fn push(&mut self, value: Operand) { self.values.push(value) }

    pub fn push_opt<T: NativeType>(&mut self, value: Option<T>) {
        self.values.push(T::wrap_opt(value))
    }

    pub fn pop(&mut self) -> QueryResult<Operand> {
        self.values.pop().ok_or_else(|| fatal!("Operand stack underflow"))
    }

    pub fn pop_as<T: NativeType>(&mut self) -> QueryResult<Option<T>> {
        T::unwrap(self.pop()?)
    }

    /// Pushes a copy of the bound tuple's operand at `index`.
    pub fn push_var(&mut self, index: usize) -> QueryResult<()> {
        let tuple = self.tuple.as_ref().ok_or(QueryError::UnboundTuple)?;
        let value = tuple.get(index).cloned().ok_or_else(|| {
            fatal!("Variable index {} out of range for tuple of arity {}", index, tuple.len())
        })?;
        self.values.push(value);
        Ok(())
    }

    /// Binds `tuple`, handing back the previously bound one.
    pub fn bind(&mut self, tuple: Tuple) -> Option<Tuple> { self.tuple.replace(tuple) }

    pub fn unbind(&mut self) -> Option<Tuple> { self.tuple.take() }

    pub fn top(&self) -> Option<&Operand> { self.values.last() }

    pub fn values(&self) -> &[Operand] { &self.values }

    pub fn take_values(&mut self) -> Vec<Operand> {
        let capacity = self.values.capacity();
        std::mem::replace(&mut self.values, Vec::with_capacity(capacity))
    }
}
