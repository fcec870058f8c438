pub mod completion;
pub mod normalizer;
pub mod recommender;
pub mod store;
