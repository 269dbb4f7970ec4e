//! Infrastructure - file-backed collaborators around the pure core

mod store;

pub use store::PortfolioStore;
