//! HTTP transport and failure normalization.

pub mod http;
pub mod normalize;
