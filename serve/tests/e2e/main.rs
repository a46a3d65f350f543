//! End-to-end tests: spawn the HTTP server on 127.0.0.1:0 with a mock gateway and call it
//! over real HTTP.

mod common;
mod explain;
mod generate;
mod landing;
mod validate;
