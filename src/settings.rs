use std::thread::Builder;

use crate::customer::CustomerId;

/* ---------- */

/// Used to configure the properties of a barber's or a customer's thread.
#[derive(Debug)]
pub struct Settings(Builder);

impl Settings {
    /// Returns the base [`Settings`] with default parameters.
    #[inline]
    pub fn new() -> Self {
        Self(Builder::new())
    }

    /// Settings of the thread running the barber `id`.
    #[inline]
    pub fn barber(id: usize) -> Self {
        Self::new().name(format!("barber-{id}"))
    }

    /// Settings of the short-lived thread carrying the customer `id`.
    ///
    /// Customers only try to take a seat, a small stack is plenty.
    #[inline]
    pub fn customer(id: CustomerId) -> Self {
        Self::new()
            .name(format!("customer-{id}"))
            .stack_size(256 * 1024)
    }

    /// Sets the thread's name.
    ///
    /// The name must not contains null bytes (`\0`).
    #[inline]
    pub fn name<T: ToString>(self, name: T) -> Self {
        Self(self.0.name(name.to_string()))
    }

    /// Sets the thread's stack size.
    ///
    /// The actual stack size may be greater than this value if the platform specifies a minimal stack size.
    #[inline]
    pub fn stack_size(self, size: usize) -> Self {
        Self(self.0.stack_size(size))
    }

    #[inline]
    pub(crate) fn into_inner(self) -> Builder {
        self.0
    }
}

impl Default for Settings {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
