use fnv::FnvHashMap;
use itertools::Itertools;

use crate::engine::data_types::*;
use crate::errors::*;
use crate::rel::{BoxedAgg, RelOp};

fn new_cache(aggs: &[BoxedAgg]) -> Tuple {
    aggs.iter().map(|agg| agg.init()).collect()
}

/// Returns the accumulators after folding in `tuple`. The caller commits the result only
/// if every aggregate succeeded, so a failed row leaves no trace.
fn fold_row(aggs: &[BoxedAgg], cache: &[Operand], tuple: &[Operand]) -> QueryResult<Tuple> {
    aggs.iter()
        .zip(cache)
        .map(|(agg, acc)| agg.add(acc.clone(), tuple))
        .collect()
}

fn display_aggs(aggs: &[BoxedAgg]) -> String {
    aggs.iter().map(|agg| agg.display_agg()).join(", ")
}

/// Folds every row into a single accumulator tuple, emitted once by `get`.
#[derive(Debug)]
pub struct UngroupedAggOp {
    aggs: Vec<BoxedAgg>,
    cache: Option<Tuple>,
}

impl UngroupedAggOp {
    pub fn new(aggs: Vec<BoxedAgg>) -> UngroupedAggOp {
        UngroupedAggOp { aggs, cache: None }
    }
}

impl RelOp for UngroupedAggOp {
    fn put(&mut self, tuple: Tuple) -> QueryResult<Option<Tuple>> {
        let folded = match self.cache {
            Some(ref cache) => fold_row(&self.aggs, cache, &tuple)?,
            None => fold_row(&self.aggs, &new_cache(&self.aggs), &tuple)?,
        };
        self.cache = Some(folded);
        Ok(None)
    }

    fn get(&mut self) -> QueryResult<Option<Tuple>> {
        Ok(self.cache.take())
    }

    fn display_op(&self) -> String {
        format!("aggregate({})", display_aggs(&self.aggs))
    }
}

/// Folds rows into one accumulator tuple per distinct group key.
///
/// Groups are kept in insertion order in `groups`, `index` maps each key to its slot.
/// `get` drains from the back, so slots of the remaining groups never move.
#[derive(Debug)]
pub struct GroupedAggOp {
    group_by: Vec<usize>,
    aggs: Vec<BoxedAgg>,
    index: FnvHashMap<Tuple, usize>,
    groups: Vec<(Tuple, Tuple)>,
}

impl GroupedAggOp {
    pub fn new(group_by: Vec<usize>, aggs: Vec<BoxedAgg>, capacity: usize) -> GroupedAggOp {
        let mut index = FnvHashMap::default();
        index.reserve(capacity);
        GroupedAggOp {
            group_by,
            aggs,
            index,
            groups: Vec::with_capacity(capacity),
        }
    }

    fn group_key(&self, tuple: &[Operand]) -> QueryResult<Tuple> {
        self.group_by.iter()
            .map(|&i| tuple.get(i).cloned()
                .ok_or_else(|| fatal!("Group column {} out of range for tuple with {} columns", i, tuple.len())))
            .collect()
    }
}

impl RelOp for GroupedAggOp {
    fn put(&mut self, tuple: Tuple) -> QueryResult<Option<Tuple>> {
        let key = self.group_key(&tuple)?;
        match self.index.get(&key) {
            Some(&slot) => {
                let folded = fold_row(&self.aggs, &self.groups[slot].1, &tuple)?;
                self.groups[slot].1 = folded;
            }
            None => {
                let folded = fold_row(&self.aggs, &new_cache(&self.aggs), &tuple)?;
                let slot = self.groups.len();
                log::trace!("New group {} at slot {}", Operand::display_tuple(&key), slot);
                self.index.insert(key.clone(), slot);
                self.groups.push((key, folded));
            }
        }
        Ok(None)
    }

    fn get(&mut self) -> QueryResult<Option<Tuple>> {
        match self.groups.pop() {
            Some((key, cache)) => {
                self.index.remove(&key);
                log::trace!("Emitting group {}, {} remaining", Operand::display_tuple(&key), self.groups.len());
                let mut row = key;
                row.extend(cache);
                Ok(Some(row))
            }
            None => Ok(None),
        }
    }

    fn display_op(&self) -> String {
        format!("group_by([{}], {})", self.group_by.iter().join(", "), display_aggs(&self.aggs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::data_types::syntax::*;
    use crate::rel::decode_aggs;

    fn aggs(code: &str) -> Vec<BoxedAgg> {
        decode_aggs(&hex::decode(code).unwrap(), 0).unwrap().0
    }

    #[test]
    fn ungrouped_drains_once() {
        // count(*), max($0<INT32>)
        let mut op = UngroupedAggOp::new(aggs("02104100"));
        assert_eq!(op.get(), Ok(None));
        for i in [3, 9, 4] {
            assert_eq!(op.put(vec![Int32(i)]), Ok(None));
        }
        assert_eq!(op.get(), Ok(Some(vec![Int64(3), Int32(9)])));
        assert_eq!(op.get(), Ok(None));
    }

    #[test]
    fn grouped_emits_each_key_once() {
        let _ = env_logger::try_init();
        // group by $0: count(*), sum($1<INT64>)
        let mut op = GroupedAggOp::new(vec![0], aggs("02102201"), 0);
        let rows = vec![
            (Str("a"), 1), (Str("b"), 2), (Str("a"), 3), (Null, 4), (Str("b"), 5), (Null, 6),
        ];
        for (key, value) in rows {
            assert_eq!(op.put(vec![key, Int64(value)]), Ok(None));
        }
        let mut results = vec![];
        while let Some(row) = op.get().unwrap() {
            results.push(row);
        }
        results.sort();
        assert_eq!(results, vec![
            vec![Null, Int64(2), Int64(10)],
            vec![Str("a"), Int64(2), Int64(4)],
            vec![Str("b"), Int64(2), Int64(7)],
        ]);
        assert_eq!(op.get(), Ok(None));
    }

    #[test]
    fn grouped_accepts_rows_after_drain() {
        let mut op = GroupedAggOp::new(vec![1, 0], aggs("0110"), 4);
        op.put(vec![Int32(1), Bool(true)]).unwrap();
        op.put(vec![Int32(1), Bool(true)]).unwrap();
        assert_eq!(op.get(), Ok(Some(vec![Bool(true), Int32(1), Int64(2)])));
        op.put(vec![Int32(1), Bool(true)]).unwrap();
        assert_eq!(op.get(), Ok(Some(vec![Bool(true), Int32(1), Int64(1)])));
        assert_eq!(op.get(), Ok(None));
    }

    #[test]
    fn ungrouped_failed_row_leaves_accumulators_untouched() {
        // count(*), sum($0<INT32>)
        let mut op = UngroupedAggOp::new(aggs("02102100"));
        op.put(vec![Int32(i32::MAX)]).unwrap();
        assert_eq!(op.put(vec![Int32(1)]), Err(QueryError::Overflow(Type::Int32)));
        assert_eq!(op.get(), Ok(Some(vec![Int64(1), Int32(i32::MAX)])));
    }

    #[test]
    fn grouped_failed_row_leaves_groups_untouched() {
        // group by $0: sum($1<INT32>), count(*)
        let mut op = GroupedAggOp::new(vec![0], aggs("02210110"), 0);
        op.put(vec![Str("a"), Int32(i32::MAX)]).unwrap();
        assert_eq!(op.put(vec![Str("a"), Int32(1)]), Err(QueryError::Overflow(Type::Int32)));
        // a new group whose first row fails is never created
        assert!(op.put(vec![Str("b"), Str("x")]).is_err());
        assert_eq!(op.get(), Ok(Some(vec![Str("a"), Int32(i32::MAX), Int64(1)])));
        assert_eq!(op.get(), Ok(None));
    }

    #[test]
    fn group_column_out_of_range() {
        let mut op = GroupedAggOp::new(vec![2], aggs("0110"), 0);
        match op.put(vec![Int32(1)]) {
            Err(QueryError::FatalError(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
