//! SPSC Ingest Buffer
//!
//! Single-producer single-consumer ring buffer the simulator (and any
//! on-device port) uses to accumulate samples between detection windows.
//! Oldest samples are overwritten once the buffer is full, matching the
//! firmware's circular buffer behavior.

use crate::{SampleWindow, SensorSample, WINDOW_SIZE};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Default capacity: four detection windows of headroom.
pub const DEFAULT_CAPACITY: usize = WINDOW_SIZE * 4;

/// Lock-free SPSC ring buffer over sensor samples.
pub struct WindowBuffer {
    storage: Box<[SensorSample]>,
    capacity: usize,
    /// Write pointer
    head: AtomicUsize,
    /// Read pointer
    tail: AtomicUsize,
    total_pushed: AtomicUsize,
}

impl WindowBuffer {
    /// Create a buffer with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let storage: Vec<SensorSample> = (0..capacity).map(|_| SensorSample::default()).collect();
        Self {
            storage: storage.into_boxed_slice(),
            capacity,
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
            total_pushed: AtomicUsize::new(0),
        }
    }

    /// Create a buffer with the default capacity.
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }

    /// Push a sample, overwriting the oldest if full.
    pub fn push(&self, sample: SensorSample) {
        let head = self.head.load(Ordering::Relaxed);
        let next_head = (head + 1) % self.capacity;

        // SAFETY: single writer, storage is pre-allocated and never resized
        unsafe {
            let ptr = self.storage.as_ptr() as *mut SensorSample;
            std::ptr::write(ptr.add(head), sample);
        }

        self.head.store(next_head, Ordering::Release);
        self.total_pushed.fetch_add(1, Ordering::Relaxed);

        let tail = self.tail.load(Ordering::Relaxed);
        if next_head == tail {
            self.tail.store((tail + 1) % self.capacity, Ordering::Release);
        }
    }

    /// Number of samples currently buffered.
    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);
        if head >= tail {
            head - tail
        } else {
            self.capacity - tail + head
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Read the last `count` samples in arrival order (oldest first).
    pub fn read_last(&self, count: usize) -> Vec<SensorSample> {
        let len = self.len();
        let count = count.min(len);
        let head = self.head.load(Ordering::Acquire);

        let mut samples = Vec::with_capacity(count);
        for i in (1..=count).rev() {
            let idx = if head >= i {
                head - i
            } else {
                self.capacity - (i - head)
            };
            samples.push(self.storage[idx]);
        }
        samples
    }

    /// The most recent detection window, once enough samples have arrived.
    pub fn window(&self) -> Option<SampleWindow> {
        if self.len() < WINDOW_SIZE {
            return None;
        }
        SampleWindow::new(self.read_last(WINDOW_SIZE)).ok()
    }

    /// Total samples pushed since creation.
    pub fn total_pushed(&self) -> usize {
        self.total_pushed.load(Ordering::Relaxed)
    }

    /// Drop all buffered samples.
    pub fn clear(&self) {
        self.tail
            .store(self.head.load(Ordering::Relaxed), Ordering::Release);
    }
}

// SAFETY: designed for SPSC use; marked Send+Sync so async runtimes may
// move the producer and consumer halves between threads.
unsafe impl Send for WindowBuffer {}
unsafe impl Sync for WindowBuffer {}
