use std::ptr;

use rmalloc::{HEADER_SIZE, Heap, print_blocks};

fn main() {
  let mut heap = Heap::new().expect("arena reservation failed");

  unsafe {
    // --------------------------------------------------------------------
    // 1) Allocate a u64 and prove the memory is usable.
    // --------------------------------------------------------------------
    let first = heap.allocate(std::mem::size_of::<u64>()).unwrap();

    println!("[1] Allocate u64 -> {:?}", first);

    let first_ptr = first as *mut u64;
    first_ptr.write(0xDEADBEEF);
    println!("[1] Value written to first = {:#X}", first_ptr.read());

    print_blocks(&heap);

    // --------------------------------------------------------------------
    // 2) Allocate 100 bytes, then release it again.
    // --------------------------------------------------------------------
    let second = heap.allocate(100).unwrap();

    ptr::write_bytes(second, 0xAB, 100);
    println!("\n[2] Allocate 100 bytes -> {:?}, filled with 0xAB", second);

    heap.release(second);
    println!("[2] Released the 100-byte block");

    print_blocks(&heap);

    // --------------------------------------------------------------------
    // 3) Allocate 50 bytes: first-fit reuses the freed block and splits
    //    it, so the address comes back unchanged.
    // --------------------------------------------------------------------
    let third = heap.allocate(50).unwrap();

    println!("\n[3] Allocate 50 bytes -> {:?}", third);
    println!(
      "[3] third == second? {}",
      if third == second {
        "yes, the freed block was split and reused"
      } else {
        "no, it landed somewhere else"
      }
    );

    print_blocks(&heap);

    // --------------------------------------------------------------------
    // 4) The split remainder serves the next request; its address is pure
    //    arithmetic: third + aligned payload + header.
    // --------------------------------------------------------------------
    let fourth = heap.allocate(25).unwrap();

    println!("\n[4] Allocate 25 bytes -> {:?}", fourth);
    println!(
      "[4] expected third + 56 + {} = {:?}",
      HEADER_SIZE,
      third.add(56 + HEADER_SIZE)
    );

    print_blocks(&heap);

    // --------------------------------------------------------------------
    // 5) Release the pair in address order, then allocate the combined
    //    size: the scan coalesces them and reuses the first address.
    // --------------------------------------------------------------------
    heap.release(third);
    heap.release(fourth);

    let fifth = heap.allocate(90).unwrap();

    println!("\n[5] Released both, allocate 90 bytes -> {:?}", fifth);
    println!(
      "[5] fifth == third? {}",
      if fifth == third {
        "yes, the blocks coalesced during the scan"
      } else {
        "no, coalescing failed"
      }
    );

    // --------------------------------------------------------------------
    // 6) Reallocate in place: free space after the block is absorbed, so
    //    the payload never moves.
    // --------------------------------------------------------------------
    let scratch = heap.allocate(16).unwrap();
    heap.release(scratch);

    let grown = heap.reallocate(fifth, 120).unwrap();

    println!("\n[6] Reallocate 90 -> 120 bytes: {:?}", grown);
    println!(
      "[6] grown == fifth? {}",
      if grown == fifth {
        "yes, grown in place"
      } else {
        "no, the payload moved"
      }
    );

    print_blocks(&heap);

    heap.release(grown);
    heap.release(first);

    println!("\n[7] Everything released:");
    print_blocks(&heap);
  }
}
