use crate::engine::data_types::*;
use crate::engine::operators::*;
use crate::errors::*;

/// Typed null literal.
#[derive(Debug)]
pub struct NullOperator {
    pub t: Type,
}

impl StackOperator for NullOperator {
    fn apply(&self, stack: &mut OperandStack) -> QueryResult<()> {
        stack.push(Operand::Null);
        Ok(())
    }

    fn result_type(&self) -> Type { self.t }

    fn display_op(&self) -> String { format!("null<{}>", self.t) }
}

#[derive(Debug)]
pub struct Constant {
    pub val: Operand,
}

impl Constant {
    pub fn boxed<T: NativeType>(val: T) -> BoxedOperator {
        Box::new(Constant { val: val.wrap() })
    }
}

impl StackOperator for Constant {
    fn apply(&self, stack: &mut OperandStack) -> QueryResult<()> {
        stack.push(self.val.clone());
        Ok(())
    }

    fn result_type(&self) -> Type { self.val.get_type() }

    fn display_op(&self) -> String { format!("{}", self.val) }
}

/// Reads one slot of the bound tuple.
#[derive(Debug)]
pub struct IndexedVariable {
    pub index: usize,
    pub t: Type,
}

impl IndexedVariable {
    pub fn boxed(index: usize, t: Type) -> BoxedOperator {
        Box::new(IndexedVariable { index, t })
    }
}

impl StackOperator for IndexedVariable {
    fn apply(&self, stack: &mut OperandStack) -> QueryResult<()> {
        stack.push_var(self.index)
    }

    fn result_type(&self) -> Type { self.t }

    fn display_op(&self) -> String { format!("${}<{}>", self.index, self.t) }
}
