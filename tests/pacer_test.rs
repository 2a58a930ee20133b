use carvis::scene::FramePacer;
use carvis::types::Pacing;

#[test]
fn pacer_reports_its_policy() {
    let p = FramePacer::new(Pacing::Cadence, 16);
    assert_eq!(p.pacing(), Pacing::Cadence);
    assert_eq!(p.interval_ms(), 16);
}

#[test]
fn delay_always_waits_full_interval() {
    let mut p = FramePacer::new(Pacing::Delay, 33);
    assert_eq!(p.pause_after_present(0), 33);
    assert_eq!(p.pause_after_present(50), 33);
    assert_eq!(p.pause_after_present(500), 33);
}

#[test]
fn cadence_first_present_waits_full_interval() {
    let mut p = FramePacer::new(Pacing::Cadence, 33);
    assert_eq!(p.pause_after_present(1_000), 33);
}

#[test]
fn cadence_subtracts_time_spent_since_last_pause() {
    let mut p = FramePacer::new(Pacing::Cadence, 33);
    assert_eq!(p.pause_after_present(0), 33);
    // Previous pause ended at 33; 10 ms of work since then.
    assert_eq!(p.pause_after_present(43), 23);
    // Pause ended at 66; a slow frame overruns the interval.
    assert_eq!(p.pause_after_present(120), 0);
    assert_eq!(p.pause_after_present(121), 32);
}

#[test]
fn zero_interval_never_pauses() {
    for pacing in [Pacing::Delay, Pacing::Cadence] {
        let mut p = FramePacer::new(pacing, 0);
        assert_eq!(p.pause_after_present(0), 0);
        assert_eq!(p.pause_after_present(10), 0);
    }
}
