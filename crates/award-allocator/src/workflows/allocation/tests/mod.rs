mod common;
mod scenario;
mod summary;
