// Integration tests (native) for the festive overlay engine.
// Everything here runs headless: a seeded RNG, the `CueLog` audio sink and the
// `Recorder` surface stand in for the browser.

use melkam_genna::audio::{Cue, CueLog};
use melkam_genna::celebration::{AppView, CelebrationEngine, ParticleKind};
use melkam_genna::config::CelebrationConfig;
use melkam_genna::random::seeded_rng;
use melkam_genna::surface::{DrawOp, Recorder};

fn engine(seed: u64) -> CelebrationEngine<CueLog> {
    CelebrationEngine::new(
        CelebrationConfig::default(),
        CueLog::default(),
        seeded_rng(seed),
        (800.0, 600.0),
    )
}

// Every particle loses exactly its decay rate of alpha per tick.
#[test]
fn alpha_drops_by_decay_each_tick() {
    let mut e = engine(1);
    e.spawn_burst(400.0, 300.0, 80, false);
    let before: Vec<(f64, f64)> = e.particles().iter().map(|p| (p.alpha, p.decay)).collect();
    assert_eq!(before.len(), 80);
    assert!(before.iter().all(|(a, _)| *a == 1.0));

    e.tick(16.0);
    assert_eq!(e.particles().len(), 80, "nothing should die after one tick");
    for (p, (alpha, decay)) in e.particles().iter().zip(&before) {
        assert!((p.alpha - (alpha - decay)).abs() < 1e-12);
    }
}

// No particle with alpha <= 0 ever survives a tick.
#[test]
fn faded_particles_are_pruned() {
    let mut e = engine(2);
    e.spawn_burst(400.0, 300.0, 100, false);
    for frame in 1..400 {
        e.tick(frame as f64 * 16.0);
        assert!(e.particles().iter().all(|p| p.alpha > 0.0));
    }
}

// A burst dropped in from above the top edge always clears out in bounded time.
#[test]
fn rain_from_above_has_bounded_lifetime() {
    let mut e = engine(3);
    for i in 0..8 {
        e.spawn_burst(100.0 * i as f64, -30.0, 70, false);
    }
    assert_eq!(e.particles().len(), 560);
    // Slowest decay is 0.002 per tick: 500 ticks at most, plus float slack.
    for frame in 1..=600 {
        e.tick(frame as f64 * 16.0);
    }
    assert!(e.particles().is_empty());
}

#[test]
fn greeting_only_for_grand_bursts() {
    let mut e = engine(4);
    e.spawn_burst(400.0, 240.0, 150, true);
    assert_eq!(e.greeting_alpha(), 0.0);
    assert!(!e.audio().cues.contains(&Cue::Greeting));

    e.spawn_burst(400.0, 240.0, 151, true);
    assert_eq!(e.greeting_alpha(), 1.0);
    assert_eq!(e.audio().cues.iter().filter(|c| **c == Cue::Greeting).count(), 1);

    e.tick(16.0);
    assert!((e.greeting_alpha() - 0.995).abs() < 1e-12);
    // Re-triggering resets rather than stacks.
    e.spawn_burst(400.0, 240.0, 300, false);
    assert_eq!(e.greeting_alpha(), 1.0);
}

#[test]
fn greeting_fades_to_zero_and_stays() {
    let mut e = engine(5);
    e.spawn_burst(400.0, 240.0, 200, false);
    for frame in 0..250 {
        e.tick(frame as f64);
    }
    assert_eq!(e.greeting_alpha(), 0.0);
}

#[test]
fn grand_bursts_play_the_layered_impact() {
    let mut e = engine(6);
    e.spawn_burst(10.0, 10.0, 60, true);
    e.spawn_burst(10.0, 10.0, 101, true);
    e.spawn_burst(10.0, 10.0, 101, false);
    assert_eq!(
        e.audio().cues,
        vec![Cue::Impact { grand: false }, Cue::Impact { grand: true }]
    );
}

#[test]
fn every_kind_shows_up_in_a_large_burst() {
    let mut e = engine(7);
    e.spawn_burst(400.0, 300.0, 1000, false);
    for kind in ParticleKind::ALL {
        assert!(e.particles().iter().any(|p| p.kind == kind), "no {kind:?} in burst");
    }
    let flowers = e.particles().iter().filter(|p| p.kind == ParticleKind::Flower).count();
    assert!(flowers > 400 && flowers < 600, "flowers: {flowers}");
}

#[test]
fn intro_fires_on_schedule() {
    let mut e = engine(8);
    e.schedule_intro(0.0);
    assert_eq!(e.pending_bursts(), 11);

    e.tick(1199.0);
    assert!(e.particles().is_empty());

    e.tick(1200.0);
    // Four corners plus the first rain wave share the start time.
    assert_eq!(e.particles().len(), 4 * 60 + 70);
    assert_eq!(e.pending_bursts(), 6);
    assert_eq!(e.audio().cues, vec![Cue::Impact { grand: false }]);

    // Last rain wave lands at 1200 + 5 * 400, after the grand burst.
    e.tick(2700.0);
    assert_eq!(e.pending_bursts(), 2);
    assert_eq!(e.greeting_alpha(), 1.0);
    e.tick(3200.0);
    assert_eq!(e.pending_bursts(), 0);
    assert!((e.greeting_alpha() - 0.995).abs() < 1e-12);
    assert!(e.audio().cues.contains(&Cue::Greeting));
}

#[test]
fn replay_skips_the_intro_delay() {
    let mut e = engine(9);
    e.replay(5000.0);
    e.tick(5000.0);
    assert!(!e.particles().is_empty());
}

#[test]
fn surprise_only_for_celebrated_views() {
    let mut e = engine(10);
    e.on_view_change(AppView::Chat, 0.0);
    assert_eq!(e.pending_bursts(), 0);
    e.on_view_change(AppView::Genna, 0.0);
    assert_eq!(e.pending_bursts(), 5);
    for t in [0.0, 250.0, 500.0, 750.0, 1000.0] {
        e.tick(t);
    }
    assert_eq!(e.pending_bursts(), 0);
    assert_eq!(e.audio().cues, vec![Cue::Impact { grand: false }]);
}

#[test]
fn pointer_bursts_respect_suppression() {
    let mut e = engine(11);
    e.set_pointer_suppressed(true);
    assert!(e.is_pointer_suppressed());
    assert!(!e.on_pointer_down(100.0, 100.0));
    assert!(e.particles().is_empty());
    e.set_pointer_suppressed(false);
    assert!(!e.is_pointer_suppressed());
    assert!(e.on_pointer_down(100.0, 100.0));
    assert_eq!(e.particles().len(), 60);
}

#[test]
fn disposed_engine_ignores_everything() {
    let mut e = engine(12);
    e.schedule_intro(0.0);
    e.spawn_burst(1.0, 1.0, 10, false);
    e.dispose();
    assert!(e.particles().is_empty());
    assert_eq!(e.pending_bursts(), 0);

    e.spawn_burst(1.0, 1.0, 10, false);
    e.tick(10_000.0);
    assert!(!e.on_pointer_down(5.0, 5.0));
    assert!(e.particles().is_empty());

    let mut rec = Recorder::new(800.0, 600.0);
    e.render(&mut rec, 0.0);
    assert!(rec.ops().is_empty());
}

#[test]
fn frame_draws_trail_fade_then_particles() {
    let mut e = engine(13);
    e.spawn_burst(400.0, 300.0, 160, false);
    let mut rec = Recorder::new(800.0, 600.0);
    e.frame(&mut rec, 16.0);
    assert_eq!(rec.texts(), vec!["መልካም ገና!", "Melkam Genna"]);
    assert_eq!(rec.count(|op| *op == DrawOp::Save), rec.count(|op| *op == DrawOp::Restore));
}

#[test]
fn frame_follows_surface_resizes() {
    let mut e = engine(14);
    let mut rec = Recorder::new(1024.0, 768.0);
    e.frame(&mut rec, 0.0);
    assert_eq!(e.size(), (1024.0, 768.0));
}
