mod common;

// std
use std::{
	sync::{
		Arc, Barrier,
		atomic::{AtomicUsize, Ordering},
	},
	thread,
};
// self
use challenge_bridge::{BridgeConfig, ChallengeBridge};
use common::*;

// The global slot lives for the whole test binary, so every assertion about it stays in one test.
#[test]
fn global_instance_is_built_once_under_concurrent_first_access() {
	const THREADS: usize = 8;

	assert!(ChallengeBridge::global().is_none());

	let builds = Arc::new(AtomicUsize::new(0));
	let barrier = Arc::new(Barrier::new(THREADS));
	let handles = (0..THREADS)
		.map(|_| {
			let builds = builds.clone();
			let barrier = barrier.clone();

			thread::spawn(move || {
				barrier.wait();

				ChallengeBridge::global_or_init(|| {
					builds.fetch_add(1, Ordering::SeqCst);

					Harness::new(BridgeConfig::default()).bridge
				})
			})
		})
		.collect::<Vec<_>>();
	let bridges = handles
		.into_iter()
		.map(|handle| handle.join().expect("Initializer thread should not panic."))
		.collect::<Vec<_>>();

	assert_eq!(builds.load(Ordering::SeqCst), 1);
	assert!(bridges.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));

	let global = ChallengeBridge::global().expect("Global bridge should be installed.");

	for _ in 0..16 {
		let again = ChallengeBridge::global_or_init(|| unreachable!("Slot is already filled."));

		assert!(Arc::ptr_eq(&global, &again));
	}

	assert!(Arc::ptr_eq(&global, &bridges[0]));
}
