/// Rounds the given size up to the next multiple of the machine word.
///
/// Every block size the allocator handles goes through this, so block
/// sizes and the successor offsets derived from them stay word-aligned.
///
/// # Examples
///
/// ```rust
/// use std::mem;
/// use rmalloc::align;
///
/// match mem::size_of::<usize>() {
///     8 => assert_eq!(align!(13), 16), // 64 bit machine.
///     4 => assert_eq!(align!(11), 12), // 32 bit machine.
///     _ => {},
/// };
/// ```
#[macro_export]
macro_rules! align {
  ($value:expr) => {
    ($value + ::std::mem::size_of::<usize>() - 1) & !(::std::mem::size_of::<usize>() - 1)
  };
}

#[cfg(test)]
mod tests {
  use std::mem;

  #[test]
  fn test_align() {
    let word = mem::size_of::<usize>();

    assert_eq!(0, align!(0));
    assert_eq!(word, align!(1));
    assert_eq!(word, align!(word));
    assert_eq!(word * 2, align!(word + 1));

    for size in 1..=(word * 8) {
      let aligned = align!(size);

      assert_eq!(0, aligned % word);
      assert!(aligned >= size);
      assert!(aligned - size < word);
    }
  }
}
