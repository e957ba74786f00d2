//! Bounded sliding window for rolling statistics.
//!
//! Provides O(1) push/evict and explicit access to the stored values so
//! callers never need to reach into the underlying queue.

use std::collections::VecDeque;

/// A fixed-capacity FIFO window of the most recent values.
///
/// Once `capacity` values are stored, each push evicts the oldest one.
/// Statistics are computed from the stored values on each call.
///
/// # Example
/// ```
/// use quant::rolling::RollingWindow;
///
/// let mut window = RollingWindow::new(3);
/// window.push_evict_oldest(1.0);
/// window.push_evict_oldest(2.0);
/// window.push_evict_oldest(3.0);
/// assert_eq!(window.mean(), Some(2.0));
///
/// let evicted = window.push_evict_oldest(4.0);
/// assert_eq!(evicted, Some(1.0));
/// assert_eq!(window.contents(), vec![2.0, 3.0, 4.0]);
/// ```
#[derive(Debug, Clone)]
pub struct RollingWindow {
    data: VecDeque<f64>,
    capacity: usize,
}

impl RollingWindow {
    /// Create a new rolling window with the given capacity.
    ///
    /// # Panics
    /// Panics if capacity is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "RollingWindow capacity must be > 0");
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a value, evicting and returning the oldest one if the window
    /// was already full.
    pub fn push_evict_oldest(&mut self, value: f64) -> Option<f64> {
        let evicted = if self.data.len() >= self.capacity {
            self.data.pop_front()
        } else {
            None
        };

        self.data.push_back(value);
        evicted
    }

    /// Number of values currently stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the window is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check if the window is full.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.data.len() >= self.capacity
    }

    /// Maximum number of stored values.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Stored values, oldest first.
    pub fn contents(&self) -> Vec<f64> {
        self.data.iter().copied().collect()
    }

    /// Iterate stored values, oldest first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.data.iter().copied()
    }

    /// The oldest stored value.
    #[inline]
    pub fn oldest(&self) -> Option<f64> {
        self.data.front().copied()
    }

    /// The most recent stored value.
    #[inline]
    pub fn newest(&self) -> Option<f64> {
        self.data.back().copied()
    }

    /// Arithmetic mean of the stored values.
    ///
    /// Returns `None` if the window is empty.
    pub fn mean(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(self.data.iter().sum::<f64>() / self.data.len() as f64)
    }

    /// Population variance (divides by `n`).
    ///
    /// A single value has variance `0.0`. Returns `None` if empty.
    pub fn variance(&self) -> Option<f64> {
        let mean = self.mean()?;
        let sum_sq: f64 = self.data.iter().map(|v| (v - mean).powi(2)).sum();
        Some(sum_sq / self.data.len() as f64)
    }

    /// Population standard deviation.
    ///
    /// A single value has standard deviation `0.0`. Returns `None` if empty.
    pub fn std_dev(&self) -> Option<f64> {
        self.variance().map(f64::sqrt)
    }
}
