use std::ptr;

use crate::align;
use crate::arena::Arena;
use crate::block::{BlockRef, HEADER_SIZE, MIN_BLOCK, WORD};
use crate::error::AllocError;

/// Arena reservation used by [`Heap::new`], 16 MiB.
pub const DEFAULT_CAPACITY: usize = 16 * 1024 * 1024;

/// First-fit free-list allocator over a single owned arena.
///
/// The arena is tiled by blocks with no gaps: walking from offset zero and
/// stepping by each block's size visits every block and lands exactly on
/// the claimed end. Releasing merges forward eagerly; a block freed before
/// its predecessor is merged lazily, when the next allocation scan walks
/// over the predecessor.
pub struct Heap {
  arena: Arena,
}

/// Snapshot of one block, as reported by [`Heap::blocks`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockInfo {
  pub offset: usize,
  pub size: usize,
  pub is_free: bool,
}

/// Aggregate counters over the block list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeapStats {
  pub blocks: usize,
  pub free_blocks: usize,
  pub used_bytes: usize,
  pub free_bytes: usize,
  pub arena_used: usize,
  pub arena_capacity: usize,
}

impl Heap {
  pub fn new() -> Result<Self, AllocError> {
    Self::with_capacity(DEFAULT_CAPACITY)
  }

  pub fn with_capacity(capacity: usize) -> Result<Self, AllocError> {
    Ok(Self {
      arena: Arena::reserve(capacity)?,
    })
  }

  /// Hands out a payload of at least `size` bytes.
  ///
  /// `size` is rounded up to the word granularity; a `size` of zero yields
  /// a minimal one-word block, so every returned pointer is distinct,
  /// non-null and releasable. Fails with [`AllocError::OutOfMemory`] when
  /// the arena reservation cannot cover the request.
  ///
  /// # Safety
  /// The returned memory is uninitialized, and the pointer must not be
  /// used after its block is released or the heap is dropped.
  pub unsafe fn allocate(
    &mut self,
    size: usize,
  ) -> Result<*mut u8, AllocError> {
    if size >= self.arena.capacity() {
      return Err(AllocError::OutOfMemory {
        requested: size,
        available: self.arena.capacity() - self.arena.len(),
      });
    }

    let total = HEADER_SIZE + align!(size).max(WORD);

    let block = match unsafe { self.find_free(total) } {
      Some(block) => unsafe {
        if self.block_size(block) >= total + MIN_BLOCK {
          self.split(block, total);
        }
        block.set_free(&self.arena, false);
        block
      },
      None => unsafe { self.grow(total)? },
    };

    Ok(block.payload_ptr(&self.arena))
  }

  /// `calloc` counterpart: allocates `count * elem_size` bytes and zeroes
  /// them. An overflowing product is reported as [`AllocError::OutOfMemory`].
  ///
  /// # Safety
  /// Same contract as [`Heap::allocate`].
  pub unsafe fn allocate_zeroed(
    &mut self,
    count: usize,
    elem_size: usize,
  ) -> Result<*mut u8, AllocError> {
    let size = count
      .checked_mul(elem_size)
      .ok_or(AllocError::OutOfMemory {
        requested: usize::MAX,
        available: self.arena.capacity() - self.arena.len(),
      })?;

    let payload = unsafe { self.allocate(size)? };

    unsafe { ptr::write_bytes(payload, 0, size) };

    Ok(payload)
  }

  /// Returns a block to the free pool.
  ///
  /// The run of free blocks directly after it is absorbed immediately.
  /// There is no predecessor link, so a free block sitting *before* this
  /// one is left alone until the next allocation scan walks over it.
  /// Releasing a null pointer is a no-op.
  ///
  /// # Safety
  /// `ptr` must be null or a payload pointer previously returned by this
  /// heap and not yet released. Debug builds assert on anything else.
  pub unsafe fn release(
    &mut self,
    ptr: *mut u8,
  ) {
    if ptr.is_null() {
      return;
    }

    unsafe {
      let block = BlockRef::from_payload(&self.arena, ptr);

      debug_assert!(!block.is_free(&self.arena), "double release");

      block.set_free(&self.arena, true);
      self.absorb_free_run(block);
    }
  }

  /// Resizes an allocation, preserving `min(old_size, new_size)` payload
  /// bytes.
  ///
  /// A null `ptr` behaves as [`Heap::allocate`]; a `new_size` of zero
  /// behaves as [`Heap::release`] and returns null. Shrinking returns the
  /// same pointer and leaves the block oversized. Growing first tries to
  /// absorb free space directly after the block so the pointer can stay
  /// put; only when that falls short is the payload moved. On failure the
  /// old payload is left intact and still owned by the caller.
  ///
  /// # Safety
  /// `ptr` must be null or a payload pointer previously returned by this
  /// heap and not yet released; it is invalidated when a new pointer is
  /// returned.
  pub unsafe fn reallocate(
    &mut self,
    ptr: *mut u8,
    new_size: usize,
  ) -> Result<*mut u8, AllocError> {
    if ptr.is_null() {
      return unsafe { self.allocate(new_size) };
    }

    if new_size == 0 {
      unsafe { self.release(ptr) };
      return Ok(ptr::null_mut());
    }

    if new_size >= self.arena.capacity() {
      return Err(AllocError::OutOfMemory {
        requested: new_size,
        available: self.arena.capacity() - self.arena.len(),
      });
    }

    unsafe {
      let block = BlockRef::from_payload(&self.arena, ptr);
      let old_payload = self.block_size(block) - HEADER_SIZE;

      if align!(new_size) <= old_payload {
        // the block already covers the request; the excess stays with it
        return Ok(ptr);
      }

      let total = HEADER_SIZE + align!(new_size);

      // grow in place if the free run directly after covers the request
      self.absorb_free_run(block);

      if self.block_size(block) >= total {
        if self.block_size(block) >= total + MIN_BLOCK {
          self.split(block, total);
        }
        return Ok(ptr);
      }

      let new_ptr = self.allocate(new_size)?;

      ptr::copy_nonoverlapping(ptr, new_ptr, old_payload.min(new_size));
      self.release(ptr);

      Ok(new_ptr)
    }
  }

  /// Walks the block list, merging runs of free neighbours as it goes,
  /// and returns the first free block of at least `total` bytes.
  unsafe fn find_free(
    &mut self,
    total: usize,
  ) -> Option<BlockRef> {
    let mut current = if self.arena.len() == 0 {
      None
    } else {
      Some(BlockRef::first())
    };

    while let Some(block) = current {
      unsafe {
        if block.is_free(&self.arena) {
          self.absorb_free_run(block);

          if self.block_size(block) >= total {
            return Some(block);
          }
        }

        current = block.next(&self.arena);
      }
    }

    None
  }

  /// Merges every free block directly after `block` into it. The absorbed
  /// headers cease to exist; their stamps are wiped.
  unsafe fn absorb_free_run(
    &mut self,
    block: BlockRef,
  ) {
    unsafe {
      while let Some(next) = block.next(&self.arena) {
        if !next.is_free(&self.arena) {
          break;
        }

        block.set_size(&self.arena, self.block_size(block) + self.block_size(next));
        next.clear_stamp(&self.arena);
      }
    }
  }

  /// Shrinks `block` to `total` bytes and carves the remainder into a new
  /// free block directly after it. The caller has already checked the
  /// remainder holds at least `MIN_BLOCK` bytes.
  unsafe fn split(
    &mut self,
    block: BlockRef,
    total: usize,
  ) {
    unsafe {
      let remainder = self.block_size(block) - total;

      block.set_size(&self.arena, total);
      BlockRef::at(block.offset() + total).init(&self.arena, remainder, true);
    }
  }

  /// Appends a fresh allocated block at the arena end.
  unsafe fn grow(
    &mut self,
    total: usize,
  ) -> Result<BlockRef, AllocError> {
    let offset = self.arena.claim(total)?;
    let block = BlockRef::at(offset);

    unsafe { block.init(&self.arena, total, false) };

    Ok(block)
  }

  unsafe fn block_size(
    &self,
    block: BlockRef,
  ) -> usize {
    unsafe { block.size(&self.arena) }
  }

  /// Snapshot of the whole block list, in address order.
  pub fn blocks(&self) -> Vec<BlockInfo> {
    let mut list = Vec::new();
    let mut offset = 0;

    while offset < self.arena.len() {
      let block = BlockRef::at(offset);

      let (size, is_free) = unsafe {
        (
          block.size(&self.arena),
          block.is_free(&self.arena),
        )
      };

      list.push(BlockInfo {
        offset,
        size,
        is_free,
      });

      offset += size;
    }

    list
  }

  pub fn stats(&self) -> HeapStats {
    let mut stats = HeapStats {
      arena_used: self.arena.len(),
      arena_capacity: self.arena.capacity(),
      ..HeapStats::default()
    };

    for block in self.blocks() {
      stats.blocks += 1;

      if block.is_free {
        stats.free_blocks += 1;
        stats.free_bytes += block.size - HEADER_SIZE;
      } else {
        stats.used_bytes += block.size - HEADER_SIZE;
      }
    }

    stats
  }
}

/// Prints the block list, one line per block.
pub fn print_blocks(heap: &Heap) {
  let stats = heap.stats();

  println!(
    "heap: {} blocks, {} free, {}/{} arena bytes claimed",
    stats.blocks, stats.free_blocks, stats.arena_used, stats.arena_capacity
  );

  for block in heap.blocks() {
    println!(
      "  {:>#10x}  {:>10}  {}",
      block.offset,
      block.size,
      if block.is_free { "free" } else { "used" }
    );
  }
}
