/// Tuning knobs shared by expression runners and relational pipelines.
#[derive(Clone, Debug)]
pub struct Options {
    /// Initial capacity of every operand stack.
    pub stack_capacity: usize,
    /// Initial number of groups reserved by grouped aggregations.
    pub group_capacity: usize,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            stack_capacity: 16,
            group_capacity: 0,
        }
    }
}
