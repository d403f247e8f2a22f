use std::cell::UnsafeCell;

use crate::error::AllocError;
use crate::heap::Heap;

/// Process-wide singleton wrapper around [`Heap`], for callers that want
/// the historical global-call surface instead of threading a handle.
///
/// The heap is created lazily, with the default reservation, on the first
/// operation. The wrapper adds no locking: it is strictly single-threaded,
/// like the engine it wraps.
///
/// ```no_run
/// use rmalloc::GlobalHeap;
///
/// static HEAP: GlobalHeap = GlobalHeap::new();
///
/// unsafe {
///   let ptr = HEAP.allocate(64).unwrap();
///   HEAP.release(ptr);
/// }
/// ```
pub struct GlobalHeap {
  inner: UnsafeCell<Option<Heap>>,
}

// Callers uphold single-threaded use; a `static` requires the marker.
unsafe impl Sync for GlobalHeap {}

impl GlobalHeap {
  pub const fn new() -> Self {
    Self {
      inner: UnsafeCell::new(None),
    }
  }

  unsafe fn heap(&self) -> Result<&mut Heap, AllocError> {
    let slot = unsafe { &mut *self.inner.get() };

    if slot.is_none() {
      *slot = Some(Heap::new()?);
    }

    Ok(slot.as_mut().expect("heap was initialized above"))
  }

  /// # Safety
  /// Single-threaded use only, plus the [`Heap::allocate`] contract.
  pub unsafe fn allocate(
    &self,
    size: usize,
  ) -> Result<*mut u8, AllocError> {
    unsafe { self.heap()?.allocate(size) }
  }

  /// # Safety
  /// Single-threaded use only, plus the [`Heap::allocate_zeroed`] contract.
  pub unsafe fn allocate_zeroed(
    &self,
    count: usize,
    elem_size: usize,
  ) -> Result<*mut u8, AllocError> {
    unsafe { self.heap()?.allocate_zeroed(count, elem_size) }
  }

  /// # Safety
  /// Single-threaded use only, plus the [`Heap::release`] contract.
  pub unsafe fn release(
    &self,
    ptr: *mut u8,
  ) {
    // a heap that was never created has issued no pointers; only null can
    // legitimately arrive before the first allocation
    if ptr.is_null() {
      return;
    }

    unsafe {
      if let Ok(heap) = self.heap() {
        heap.release(ptr);
      }
    }
  }

  /// # Safety
  /// Single-threaded use only, plus the [`Heap::reallocate`] contract.
  pub unsafe fn reallocate(
    &self,
    ptr: *mut u8,
    new_size: usize,
  ) -> Result<*mut u8, AllocError> {
    unsafe { self.heap()?.reallocate(ptr, new_size) }
  }
}

impl Default for GlobalHeap {
  fn default() -> Self {
    Self::new()
  }
}
