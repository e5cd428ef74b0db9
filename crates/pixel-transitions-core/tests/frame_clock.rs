//! Integration tests for frame clock dispatch.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use pixel_transitions_core::{FrameClock, ListenState, ManualTimeSource, Property, Signal};

#[test]
fn self_terminating_subscription_does_not_disturb_siblings() {
    let clock = FrameClock::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    {
        let log = log.clone();
        clock.subscribe_forever(move || log.lock().push("watch"));
    }
    {
        let log = log.clone();
        let mut remaining = 2;
        clock.subscribe_until(move || {
            log.lock().push("progress");
            remaining -= 1;
            if remaining == 0 { ListenState::Done } else { ListenState::Continue }
        });
    }
    {
        let log = log.clone();
        clock.subscribe_forever(move || log.lock().push("render"));
    }

    for _ in 0..3 {
        clock.tick();
    }

    assert_eq!(
        *log.lock(),
        vec![
            "watch", "progress", "render",
            "watch", "progress", "render",
            "watch", "render",
        ]
    );
}

#[test]
fn time_based_progress_survives_dropped_frames() {
    let time = Arc::new(ManualTimeSource::new());
    let clock = Arc::new(FrameClock::with_time_source(time.clone()));
    let start = clock.now();
    let ticks = Arc::new(AtomicUsize::new(0));

    let clock_clone = clock.clone();
    let ticks_clone = ticks.clone();
    clock.subscribe_until(move || {
        ticks_clone.fetch_add(1, Ordering::SeqCst);
        if clock_clone.now() - start >= Duration::from_millis(500) {
            ListenState::Done
        } else {
            ListenState::Continue
        }
    });

    // A single late frame covers the whole interval.
    time.advance(Duration::from_millis(600));
    clock.tick();

    assert_eq!(ticks.load(Ordering::SeqCst), 1);
    assert_eq!(clock.subscription_count(), 0);
}

#[test]
fn property_change_drives_signal_from_frame_callback() {
    let clock = FrameClock::new();
    let selection = Arc::new(Property::new(0usize));
    let changed = Arc::new(Signal::<usize>::new());
    let seen = Arc::new(Mutex::new(Vec::new()));

    {
        let seen = seen.clone();
        changed.connect(move |&index| seen.lock().push(index));
    }
    {
        let selection = selection.clone();
        let changed = changed.clone();
        let mut last = selection.get();
        clock.subscribe_forever(move || {
            let index = selection.get();
            if index != last {
                last = index;
                changed.emit(index);
            }
        });
    }

    clock.tick();
    selection.set(2);
    clock.tick();
    clock.tick();
    selection.set(1);
    clock.tick();

    assert_eq!(*seen.lock(), vec![2, 1]);
}
