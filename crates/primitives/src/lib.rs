//! Primitive types shared by the batch proposer, the codec and the database.

pub use batch::{Batch, BatchCommitRecord};
mod batch;

pub use block::{BlockContext, L2Block};
mod block;

pub use chunk::{Chunk, ChunkInfo};
mod chunk;
