pub mod cli;
pub mod config;
pub mod engine;
pub mod normalize;
pub mod pipeline;
pub mod registry;
pub mod report;
pub mod source;
pub mod util;
