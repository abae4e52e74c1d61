pub mod completion;
pub mod prompt;
pub mod providers;
pub mod recommendations;
pub mod resolver;
pub mod storyline;

pub use recommendations::Recommender;
