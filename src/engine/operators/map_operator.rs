use std::fmt;
use std::marker::PhantomData;

use crate::engine::data_types::*;
use crate::engine::operators::*;
use crate::errors::*;

/// Single-input compute operator with null propagation.
#[derive(Debug)]
pub struct MapOperator<Input, Output, Map> {
    map: PhantomData<(Input, Output, Map)>,
}

impl<Input, Output, Map> MapOperator<Input, Output, Map>
    where Input: NativeType,
          Output: NativeType,
          Map: MapOp<Input, Output> {
    pub fn boxed() -> BoxedOperator {
        Box::new(MapOperator::<Input, Output, Map> { map: PhantomData })
    }
}

impl<Input, Output, Map> StackOperator for MapOperator<Input, Output, Map>
    where Input: NativeType,
          Output: NativeType,
          Map: MapOp<Input, Output> {
    fn apply(&self, stack: &mut OperandStack) -> QueryResult<()> {
        let result = match stack.pop_as::<Input>()? {
            Some(v) => Map::apply(v)?,
            None => None,
        };
        stack.push_opt(result);
        Ok(())
    }

    fn result_type(&self) -> Type { Output::t() }

    fn display_op(&self) -> String {
        format!("{}({})", Map::name(), Input::t())
    }
}

pub trait MapOp<Input, Output>: fmt::Debug + Send + Sync + 'static {
    fn apply(v: Input) -> QueryResult<Option<Output>>;
    fn name() -> &'static str;
}
