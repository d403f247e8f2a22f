use rmalloc::GlobalHeap;

static HEAP: GlobalHeap = GlobalHeap::new();

// single test function: the shim is single-threaded by contract, and the
// test harness runs separate #[test] fns on separate threads
#[test]
fn global_shim_round_trip() {
  unsafe {
    let a = HEAP.allocate(24).unwrap();

    for i in 0..24 {
      *a.add(i) = i as u8;
    }

    let b = HEAP.allocate_zeroed(4, 8).unwrap();

    for i in 0..32 {
      assert_eq!(0, *b.add(i));
    }

    let grown = HEAP.reallocate(a, 64).unwrap();

    for i in 0..24 {
      assert_eq!(i as u8, *grown.add(i));
    }

    HEAP.release(grown);
    HEAP.release(b);

    // released neighbours coalesce back into reusable space
    let again = HEAP.allocate(16).unwrap();

    assert!(!again.is_null());

    HEAP.release(again);
  }
}
