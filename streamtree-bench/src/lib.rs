//! streamtree benchmarks with the mimalloc global allocator.
//!
//! Every insertion allocates a leaf node plus a few transient root nodes, so
//! the allocator shows up in insertion profiles. All benchmarks in this
//! crate link this library to run under mimalloc.

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;
