pub mod batch;
pub mod constants;
pub mod domain;
pub mod error;
pub mod extract;
pub mod logging;
pub mod parser;
pub mod pipeline;
pub mod reference;
pub mod resolver;
pub mod storage;
