//! Board lifecycle hooks used by the controller
//!
//! Timer, LED and power management bring-up happen in `main` before the
//! controller runs; the controller only signals state and yields while idle.

use core::future::Future;

/// Board services the controller calls into
pub trait Platform {
    /// Advertising is running (board indication, e.g. LED on)
    fn indicate_advertising(&mut self);

    /// Yield to the platform until there is something to do.
    ///
    /// Called in a loop forever once the controller has nothing left to do.
    fn idle(&mut self) -> impl Future<Output = ()>;
}
