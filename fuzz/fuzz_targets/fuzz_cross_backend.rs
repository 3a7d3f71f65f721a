#![no_main]

use libfuzzer_sys::fuzz_target;
use std::sync::Arc;

use gilbench_core::registry::{default_backends, DefaultFactory};
use gilbench_core::ExclusivityLock;

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    // First 4 bytes as n, capped for speed (four backends per input)
    let n = u64::from(u32::from_le_bytes([data[0], data[1], data[2], data[3]])) % 100_000;

    let factory = DefaultFactory::with_lock(Arc::new(ExclusivityLock::new()));
    let backends = default_backends(&factory).expect("default backends compile");

    let expected = gilbench_core::fibonacci(n);
    for backend in &backends {
        let got = backend.invoke(n).expect("backend invocation");
        assert_eq!(got, expected, "{} disagrees at n={n}", backend.name());
    }

    // Recurrence holds modulo 2^64.
    let next = gilbench_core::fibonacci(n + 1);
    assert_eq!(expected.wrapping_add(next), gilbench_core::fibonacci(n + 2));
});
