mod operator_vector;
mod runner;

pub use self::operator_vector::OperatorVector;
pub use self::runner::Runner;
