// Download pipeline - link resolution, stream selection, fetch, delivery

pub mod caption;
pub mod errors;
pub mod hosting;
pub mod models;
pub mod pipeline;
pub mod resolver;
pub mod selector;
pub mod utils;
pub mod ytdlp;
