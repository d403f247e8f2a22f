use std::ptr;

use rmalloc::{AllocError, HEADER_SIZE, Heap, align};

fn heap() -> Heap {
  Heap::with_capacity(1 << 20).unwrap()
}

#[test]
fn grows_in_place_over_a_free_successor() {
  let mut heap = heap();

  unsafe {
    let a = heap.allocate(10).unwrap();
    let b = heap.allocate(10).unwrap();

    heap.release(b);

    // the freed successor is absorbed, so the pointer stays put
    let c = heap.reallocate(a, 20).unwrap();

    assert_eq!(a, c);

    heap.release(c);
  }
}

#[test]
fn in_place_growth_resplits_the_excess() {
  let mut heap = heap();

  unsafe {
    let a = heap.allocate(10).unwrap();
    let b = heap.allocate(10).unwrap();
    let c = heap.allocate(10).unwrap();

    heap.release(b);

    let grown = heap.reallocate(a, 20).unwrap();

    assert_eq!(a, grown);

    let blocks = heap.blocks();

    assert_eq!(3, blocks.len());
    assert_eq!(HEADER_SIZE + align!(20), blocks[0].size);
    assert!(blocks[1].is_free);
    assert!(!blocks[2].is_free);

    // c still sits two original blocks after a, untouched by the resplit
    assert_eq!(c as usize, a as usize + 2 * (HEADER_SIZE + align!(10)));
  }
}

#[test]
fn moves_and_preserves_content_when_blocked() {
  let mut heap = heap();

  unsafe {
    let a = heap.allocate(32).unwrap();
    let b = heap.allocate(32).unwrap();

    for i in 0..32 {
      *a.add(i) = i as u8;
      *b.add(i) = 0xC0 | (i as u8 & 0x0F);
    }

    // b sits right after a and is live, so growth has to move the payload
    let c = heap.reallocate(a, 200).unwrap();

    assert_ne!(a, c);

    for i in 0..32 {
      assert_eq!(i as u8, *c.add(i));
      assert_eq!(0xC0 | (i as u8 & 0x0F), *b.add(i));
    }

    // the old block went back to the free pool
    assert!(heap.blocks()[0].is_free);
  }
}

#[test]
fn shrinking_returns_the_same_pointer_unchanged() {
  let mut heap = heap();

  unsafe {
    let a = heap.allocate(64).unwrap();

    for i in 0..64 {
      *a.add(i) = i as u8;
    }

    let c = heap.reallocate(a, 8).unwrap();

    assert_eq!(a, c);

    for i in 0..8 {
      assert_eq!(i as u8, *c.add(i));
    }

    // the block keeps its full size until released
    assert_eq!(HEADER_SIZE + align!(64), heap.blocks()[0].size);
  }
}

#[test]
fn null_pointer_behaves_as_allocate() {
  let mut heap = heap();

  unsafe {
    let a = heap.reallocate(ptr::null_mut(), 16).unwrap();

    assert!(!a.is_null());

    *a = 9;
    assert_eq!(9, *a);
  }
}

#[test]
fn zero_size_behaves_as_release() {
  let mut heap = heap();

  unsafe {
    let a = heap.allocate(16).unwrap();
    let c = heap.reallocate(a, 0).unwrap();

    assert!(c.is_null());
    assert!(heap.blocks()[0].is_free);
  }
}

#[test]
fn failed_growth_leaves_the_payload_intact() {
  let mut heap = Heap::with_capacity(4096).unwrap();

  unsafe {
    let a = heap.allocate(64).unwrap();

    ptr::write_bytes(a, 0x5A, 64);

    let err = heap.reallocate(a, 8192).unwrap_err();

    assert!(matches!(err, AllocError::OutOfMemory { requested: 8192, .. }));

    for i in 0..64 {
      assert_eq!(0x5A, *a.add(i));
    }

    heap.release(a);
  }
}
