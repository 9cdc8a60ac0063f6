// Public API surface of the profile module.
pub mod display;
pub mod equivalence;
pub mod inputs;
pub mod model;
pub mod names;
pub mod normalize;
pub mod outputs;
pub mod raw_tree;
