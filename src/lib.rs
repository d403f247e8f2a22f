//! # rmalloc - A First-Fit Free-List Memory Allocator
//!
//! This crate provides a classic **free-list allocator**: a single growable
//! arena tiled by blocks, a first-fit scan for reuse, block splitting on
//! partial reuse, and coalescing of adjacent free blocks.
//!
//! ## Overview
//!
//! ```text
//!   Heap Layout:
//!
//!   ┌────────────────────────────────────────────────────────────────────┐
//!   │                        ARENA RESERVATION                           │
//!   │                                                                    │
//!   │   ┌────┬───────┬────┬──────────┬────┬─────┬─────────────────────┐  │
//!   │   │ H  │ used  │ H  │   free   │ H  │used │      Unclaimed      │  │
//!   │   └────┴───────┴────┴──────────┴────┴─────┴─────────────────────┘  │
//!   │   ▲                                       ▲                     ▲  │
//!   │   │                                       │                     │  │
//!   │  base                                    end ──── grows ──►  capacity
//!   │                                                                    │
//!   └────────────────────────────────────────────────────────────────────┘
//!
//!   H = block header (size + free flag). There are no next/prev pointers:
//!   the block after a header at offset o starts at o + size, so the block
//!   list tiles [base, end) exactly — no gaps, no overlaps.
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//!   rmalloc
//!   ├── align      - Alignment macro (align!)
//!   ├── arena      - Reserved byte region the blocks tile (internal)
//!   ├── block      - Block header format and offset handles (internal)
//!   ├── heap       - Heap engine: allocate / release / reallocate
//!   ├── error      - AllocError
//!   └── global     - GlobalHeap, a process-wide singleton shim
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use rmalloc::Heap;
//!
//! let mut heap = Heap::new().unwrap();
//!
//! unsafe {
//!     let ptr = heap.allocate(std::mem::size_of::<u64>()).unwrap() as *mut u64;
//!
//!     *ptr = 42;
//!     assert_eq!(*ptr, 42);
//!
//!     let bigger = heap.reallocate(ptr as *mut u8, 64).unwrap();
//!     heap.release(bigger);
//! }
//! ```
//!
//! ## How It Works
//!
//! Allocation scans the block list from the arena base. Whenever the scan
//! sits on a free block whose successor is also free, the two are merged
//! before the block is sized up as a candidate — that is where a block
//! freed *after* its neighbor finally coalesces, since release itself only
//! merges forward:
//!
//! ```text
//!   release(b):            b ──► successor free?  merge immediately
//!   release(a) then
//!   next allocate scan:    a ──► successor free?  merge while scanning
//! ```
//!
//! The first free block large enough wins. If it is larger than the request
//! by at least a header plus one word, it is split and the tail becomes a
//! new free block; otherwise the whole block is handed out. When no block
//! fits, the arena claims fresh space at its end — addresses never move, so
//! pointers issued earlier stay valid.
//!
//! ## Features
//!
//! - **First-fit reuse** with splitting and coalescing
//! - **In-place reallocation** when free space sits directly after a block
//! - **Pointer stability**: the arena only ever extends, never relocates
//! - **Debug-mode pointer validation**: a header stamp catches foreign and
//!   stale pointers in debug builds
//!
//! ## Limitations
//!
//! - **Single-threaded only**: no synchronization primitives
//! - **Word alignment only**: payloads are aligned for pointer-sized data,
//!   nothing stricter
//! - **The arena never shrinks**: released trailing space is kept as a free
//!   block for reuse rather than returned to the environment
//! - **Unix-only**: the reservation comes from `mmap` (POSIX systems)
//!
//! ## Safety
//!
//! This crate hands out raw pointers into memory it manages. All three
//! operations are `unsafe`: the caller keeps the usual allocator contract
//! of releasing each pointer exactly once and not using it afterwards.

pub mod align;
mod arena;
mod block;
mod error;
mod global;
mod heap;

pub use block::HEADER_SIZE;
pub use error::AllocError;
pub use global::GlobalHeap;
pub use heap::{BlockInfo, DEFAULT_CAPACITY, Heap, HeapStats, print_blocks};
