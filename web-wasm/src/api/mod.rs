//! バックエンドAPI

mod backend;

pub use backend::analyze_blueprint;
