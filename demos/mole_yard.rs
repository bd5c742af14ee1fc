//! Whack-a-mole over a bounded queue
//!
//! Fifteen producers each raise a mole and queue it at the tail; fifteen
//! consumers each take a mole from the head and whack it. The queue holds at
//! most four moles, so producers regularly stall until a consumer makes room.
//! A lawn thread prints the queue every few milliseconds until it is stopped.

use monideque::metrics::MetricsCollector;
use monideque::{BoundedQueue, End};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const YARD_CAPACITY: usize = 4;
const NUM_THREADS: usize = 15;
const LAWN_SIZE: usize = 40;

#[derive(Debug)]
struct Mole {
    id: usize,
    row: usize,
    col: usize,
    lawn: Arc<Lawn>,
}

impl Mole {
    fn new(id: usize, lawn: Arc<Lawn>) -> Self {
        // Scatter moles over the lawn without a random source
        let cell = id.wrapping_mul(7919) % (LAWN_SIZE * LAWN_SIZE);
        lawn.raised.fetch_add(1, Ordering::Relaxed);
        Self {
            id,
            row: cell / LAWN_SIZE,
            col: cell % LAWN_SIZE,
            lawn,
        }
    }

    fn whack(self) {
        thread::sleep(Duration::from_millis(5 + (self.id % 4) as u64 * 5));
        println!("  whacked mole #{:02} at ({:2}, {:2})", self.id, self.row, self.col);
        self.lawn.whacked.fetch_add(1, Ordering::Relaxed);
    }
}

/// Console stand-in for a display surface.
#[derive(Debug, Default)]
struct Lawn {
    raised: AtomicUsize,
    whacked: AtomicUsize,
    running: AtomicBool,
}

impl Lawn {
    /// Starts a thread that prints the yard until [`Lawn::stop`] is called.
    fn watch(self: &Arc<Self>, yard: Arc<BoundedQueue<Mole>>) -> JoinHandle<()> {
        self.running.store(true, Ordering::Release);
        let lawn = Arc::clone(self);
        thread::spawn(move || {
            while lawn.running.load(Ordering::Acquire) {
                let occupants = yard.render_with(|mole| format!("#{:02}", mole.id));
                println!(
                    "lawn: [{occupants}] raised={} whacked={}",
                    lawn.raised.load(Ordering::Relaxed),
                    lawn.whacked.load(Ordering::Relaxed)
                );
                thread::sleep(Duration::from_millis(10));
            }
        })
    }

    fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }
}

fn main() {
    println!("=== Mole Yard ===");
    println!(
        "{NUM_THREADS} producers, {NUM_THREADS} consumers, yard capacity {YARD_CAPACITY}"
    );
    println!();

    let yard = Arc::new(BoundedQueue::new(YARD_CAPACITY));
    let lawn = Arc::new(Lawn::default());
    let watcher = lawn.watch(Arc::clone(&yard));
    let barrier = Arc::new(Barrier::new(NUM_THREADS * 2));
    let start = Instant::now();

    let producers: Vec<_> = (0..NUM_THREADS)
        .map(|id| {
            let yard = Arc::clone(&yard);
            let lawn = Arc::clone(&lawn);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                yard.put(End::Tail, Mole::new(id, lawn));
            })
        })
        .collect();

    let consumers: Vec<_> = (0..NUM_THREADS)
        .map(|_| {
            let yard = Arc::clone(&yard);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                yard.get(End::Head).whack();
            })
        })
        .collect();

    for handle in producers.into_iter().chain(consumers) {
        handle.join().unwrap();
    }

    lawn.stop();
    watcher.join().unwrap();

    let metrics = yard.metrics();
    println!();
    println!("All moles handled in {:?}", start.elapsed());
    println!("  Raised: {}", lawn.raised.load(Ordering::Relaxed));
    println!("  Whacked: {}", lawn.whacked.load(Ordering::Relaxed));
    println!("  Blocked operations: {}", metrics.contended_operations);
    println!("  Peak occupancy: {}", metrics.peak_len);

    let yard = match Arc::try_unwrap(yard) {
        Ok(yard) => yard,
        Err(_) => unreachable!("every thread holding the yard has been joined"),
    };
    let mut escaped = 0;
    yard.destroy_with(|_mole: Mole| escaped += 1);
    println!("  Escaped: {escaped}");
}
