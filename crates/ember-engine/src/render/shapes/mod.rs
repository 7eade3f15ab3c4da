//! Per-kind renderers for the draw stream.
//!
//! Each renderer uploads every run of its kind in `prepare` and draws one run
//! per `paint` call, so runs of different kinds interleave in paint order.

mod common;

pub mod rect;
pub mod sprite;
pub mod text;
