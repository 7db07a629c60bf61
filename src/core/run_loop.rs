// src/core/run_loop.rs
//! Fixed-period timer on the main CFRunLoop
//!
//! The pasteboard is sampled from the same thread that runs AppKit, so the
//! poller is driven by a `CFRunLoopTimer` rather than a background thread.
//! The timer calls back into Rust through the context `info` pointer, which
//! points at a boxed closure owned by [`MonitorTimer`].

use std::ffi::c_void;
use std::time::Duration;

use core_foundation::base::TCFType;
use core_foundation::runloop::{CFRunLoop, CFRunLoopTimer};
use core_foundation_sys::date::CFAbsoluteTimeGetCurrent;
use core_foundation_sys::runloop::{
    kCFRunLoopDefaultMode, CFRunLoopTimerContext, CFRunLoopTimerInvalidate, CFRunLoopTimerRef,
};
use objc2::MainThreadMarker;
use tracing::{debug, info};

use crate::error::{ClipError, Result};

struct TickState {
    on_tick: Box<dyn FnMut()>,
}

extern "C" fn timer_fired(_timer: CFRunLoopTimerRef, info: *mut c_void) {
    if info.is_null() {
        return;
    }
    // SAFETY: `info` is the `TickState` boxed by `MonitorTimer`, which
    // invalidates the timer before the box is dropped.
    let state = unsafe { &mut *(info as *mut TickState) };
    (state.on_tick)();
}

/// Repeating timer installed on the main run loop.
///
/// Fires `on_tick` every `interval` until [`MonitorTimer::stop`] is called or
/// the timer is dropped.
pub struct MonitorTimer {
    timer: CFRunLoopTimer,
    running: bool,
    // Must outlive `timer`: the run loop holds a raw pointer into it.
    _state: Box<TickState>,
}

impl MonitorTimer {
    pub fn start<F>(interval: Duration, on_tick: F) -> Result<Self>
    where
        F: FnMut() + 'static,
    {
        let _mtm = MainThreadMarker::new().ok_or(ClipError::NotMainThread)?;

        let mut state = Box::new(TickState {
            on_tick: Box::new(on_tick),
        });
        let mut context = CFRunLoopTimerContext {
            version: 0,
            info: &mut *state as *mut TickState as *mut c_void,
            retain: None,
            release: None,
            copyDescription: None,
        };

        let seconds = interval.as_secs_f64();
        let fire_date = unsafe { CFAbsoluteTimeGetCurrent() } + seconds;
        let timer = CFRunLoopTimer::new(fire_date, seconds, 0, 0, timer_fired, &mut context);

        CFRunLoop::get_main().add_timer(&timer, unsafe { kCFRunLoopDefaultMode });
        info!("pasteboard timer started ({:.1}s interval)", seconds);

        Ok(Self {
            timer,
            running: true,
            _state: state,
        })
    }

    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        unsafe { CFRunLoopTimerInvalidate(self.timer.as_concrete_TypeRef()) };
        self.running = false;
        debug!("pasteboard timer invalidated");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Drop for MonitorTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Pump the main run loop until [`stop_main_run_loop`] is called
pub fn run_main_loop() {
    CFRunLoop::run_current();
}

pub fn stop_main_run_loop() {
    CFRunLoop::get_main().stop();
}
