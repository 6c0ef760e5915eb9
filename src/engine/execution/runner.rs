use crate::engine::data_types::*;
use crate::engine::execution::OperatorVector;
use crate::engine::operators::OperandStack;
use crate::errors::*;
use crate::options::Options;

/// A compiled expression together with the stack it runs on.
///
/// ```
/// use exprvm::{Operand, Runner};
///
/// let mut runner = Runner::new();
/// runner.decode(&[0x11, 0x01, 0x11, 0x01, 0x83, 0x01]).unwrap();
/// runner.run().unwrap();
/// assert_eq!(runner.get(), Operand::Int32(2));
/// ```
#[derive(Debug)]
pub struct Runner {
    operators: OperatorVector,
    stack: OperandStack,
}

impl Runner {
    pub fn new() -> Runner {
        Runner::with_options(&Options::default())
    }

    pub fn with_options(options: &Options) -> Runner {
        Runner {
            operators: OperatorVector::default(),
            stack: OperandStack::with_capacity(options.stack_capacity),
        }
    }

    /// Returns the number of bytes consumed, including a terminating end-of-expression byte.
    pub fn decode(&mut self, code: &[u8]) -> QueryResult<usize> {
        self.operators.decode(code)
    }

    pub fn bind_tuple(&mut self, tuple: Tuple) -> Option<Tuple> {
        self.stack.bind(tuple)
    }

    pub fn unbind_tuple(&mut self) -> Option<Tuple> {
        self.stack.unbind()
    }

    pub fn run(&mut self) -> QueryResult<()> {
        self.stack.clear();
        for op in self.operators.iter() {
            op.apply(&mut self.stack)?;
        }
        Ok(())
    }

    /// Binds `tuple`, runs the program and returns the result along with the tuple.
    pub fn eval(&mut self, tuple: Tuple) -> QueryResult<(Operand, Tuple)> {
        self.bind_tuple(tuple);
        let result = self.run().map(|_| self.get());
        let tuple = self.unbind_tuple().unwrap_or_default();
        Ok((result?, tuple))
    }

    /// Top of the stack, null if the program produced nothing.
    pub fn get(&self) -> Operand {
        self.stack.top().cloned().unwrap_or(Operand::Null)
    }

    pub fn get_as<T: NativeType>(&self) -> QueryResult<Option<T>> {
        T::unwrap(self.get())
    }

    pub fn get_type(&self) -> Type {
        self.operators.result_type()
    }

    /// All results of a multi-result program, first pushed first.
    pub fn get_all(&self) -> Tuple {
        self.stack.values().to_vec()
    }

    pub fn take_all(&mut self) -> Tuple {
        self.stack.take_values()
    }

    pub fn operators(&self) -> &OperatorVector {
        &self.operators
    }
}

impl Default for Runner {
    fn default() -> Runner { Runner::new() }
}
