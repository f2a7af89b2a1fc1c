use crate::error::DomainError;
use rust_decimal::Decimal;
use std::collections::VecDeque;
use std::num::NonZeroUsize;

/// Simple Moving Average, computed incrementally.
///
/// The value at a point is the arithmetic mean of the `window` most recent
/// prices, the current one included. Until `window` prices have been seen
/// there is no value.
#[derive(Debug, Clone)]
pub struct SimpleMovingAverage {
    window: usize,
    values: VecDeque<Decimal>,
    sum: Decimal,
}

impl SimpleMovingAverage {
    /// Creates a new SMA over `window` values.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidWindow` if `window` is zero.
    pub fn new(window: usize) -> Result<Self, DomainError> {
        NonZeroUsize::new(window)
            .map(Self::from_nonzero)
            .ok_or(DomainError::InvalidWindow)
    }

    /// Creates a new SMA from a window that is known to be non-zero.
    pub fn from_nonzero(window: NonZeroUsize) -> Self {
        Self {
            window: window.get(),
            values: VecDeque::with_capacity(window.get()),
            sum: Decimal::ZERO,
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Feed one price, return the current average once the window is full.
    pub fn update(&mut self, price: Decimal) -> Option<Decimal> {
        self.values.push_back(price);
        self.sum += price;
        if self.values.len() > self.window
            && let Some(oldest) = self.values.pop_front()
        {
            self.sum -= oldest;
        }
        self.value()
    }

    /// Current average, if the window is full.
    pub fn value(&self) -> Option<Decimal> {
        if self.is_warm() {
            Some(self.sum / Decimal::from(self.window))
        } else {
            None
        }
    }

    pub fn is_warm(&self) -> bool {
        self.values.len() == self.window
    }

    pub fn reset(&mut self) {
        self.values.clear();
        self.sum = Decimal::ZERO;
    }
}
