//! Integration tests for the animation kernel as the overlay uses it:
//! step-scoped tickers driving loops, fades, and springs.

use std::time::Duration;

use spotlight_core::animation::{
    Animation, Easing, RepeatMode, Repeating, Spring, TickerSet, Tween,
};

const FRAME: Duration = Duration::from_millis(16);

#[test]
fn step_scoped_tickers_stop_on_cancel_all() {
    let mut set = TickerSet::new();
    let ripple = set.spawn("ripple", Repeating::from_millis(2000));
    let pulse = set.spawn(
        "pulse",
        Repeating::from_millis(1000)
            .mode(RepeatMode::Reverse)
            .easing(Easing::FastOutSlowIn),
    );
    let dim = set.spawn("dim", Tween::new(Duration::from_millis(800)).easing(Easing::EaseOut));

    for _ in 0..30 {
        set.tick(FRAME);
    }
    assert_eq!(set.active_count(), 3);
    assert!(set.is_animating());

    let before = set.value(ripple.id()).unwrap();
    assert!(before > 0.0 && before < 1.0);

    // Step changes: everything owned by the old step goes away.
    assert_eq!(set.cancel_all(), 3);
    for handle in [&ripple, &pulse, &dim] {
        assert!(handle.is_cancelled());
        assert_eq!(set.value(handle.id()), None);
    }
    set.tick(FRAME);
    assert_eq!(set.active_count(), 0);
}

#[test]
fn dim_fade_completes_but_loops_keep_running() {
    let mut set = TickerSet::new();
    let ripple = set.spawn("ripple", Repeating::from_millis(300));
    let dim = set.spawn("dim", Tween::new(Duration::from_millis(100)));
    for _ in 0..20 {
        set.tick(FRAME);
    }
    assert_eq!(set.is_complete(dim.id()), Some(true));
    assert_eq!(set.is_complete(ripple.id()), Some(false));
    assert!(set.is_animating());
}

#[test]
fn spring_entrance_scale_settles_at_one() {
    let mut spring = Spring::new(0.8, 1.0)
        .with_stiffness(200.0)
        .with_damping_ratio(0.5);
    let mut frames = 0;
    while !spring.is_complete() && frames < 1000 {
        spring.tick(FRAME);
        frames += 1;
    }
    assert!(spring.is_complete(), "spring never settled");
    assert!((spring.raw_value() - 1.0).abs() < 1e-6);
}
