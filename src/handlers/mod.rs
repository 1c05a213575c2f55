pub mod locator;
pub mod provider;
pub mod ranker;
pub mod tracker;
