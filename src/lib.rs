pub mod board;
pub mod catalog;
pub mod config;
pub mod error;
pub mod feed;
pub mod handler;
pub mod model;
pub mod normalizer;
pub mod scheduler;
pub mod selector;
