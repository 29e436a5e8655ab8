//! blueprint-measure: 建築図面の寸法解析クライアント（CLI）

pub mod cli;
pub mod client;
pub mod config;
pub mod download;
pub mod error;
pub mod output;
pub mod picker;
pub mod report;
pub mod runner;
