mod common;
mod expiry;
mod normalize;
mod service;
