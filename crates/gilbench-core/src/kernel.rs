//! The numeric loop every backend runs.

use std::hint::black_box;

/// Iterative F(n) with wrapping 64-bit additions.
///
/// Exact up to n = 93; above that the value is F(n) mod 2^64. Input and
/// output go through `black_box` so a timed call cannot be folded away.
#[inline(never)]
#[must_use]
pub fn fib_wrapping(n: u64) -> u64 {
    let n = black_box(n);
    if n <= 1 {
        return n;
    }

    let mut a: u64;
    let mut b: u64 = 1;
    let mut c: u64 = 1;
    for _ in 2..n {
        a = b;
        b = c;
        c = a.wrapping_add(b);
    }

    black_box(c)
}
