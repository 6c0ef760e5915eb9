pub mod codec;
pub mod data_types;
pub mod execution;
pub mod opcodes;
pub mod operators;
