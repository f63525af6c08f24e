//! Leaf panel shapes.
//!
//! None of these carries the `type` discriminator; it belongs to
//! [`Panel`](crate::panel::Panel), which writes it on encode.

pub mod graph;
pub mod row;
pub mod singlestat;
pub mod target;

pub use self::{
    graph::{Graph, Yaxis},
    row::Row,
    singlestat::SingleStat,
    target::Target,
};
