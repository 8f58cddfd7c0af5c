pub mod forest;
pub mod path_tree;
pub mod text;

pub use forest::{DynamicForest, Forest};
pub use path_tree::{Cost, Idx, PathTrees, Up, EMPTY};
pub use text::ParseForestError;
