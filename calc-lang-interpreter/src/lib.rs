pub mod builtins;
pub mod environment;
pub mod evaluator;
pub mod object;

pub use evaluator::Evaluator;
pub use object::Object;
