//! Integration test: obstacle generation
//!
//! Runs a horizon at fixed speeds for thousands of frames and checks every
//! spawn against the spacing and duplication rules.

use dino_runner::core::{DifficultyProfile, MAX_OBSTACLE_DUPLICATION, MS_PER_FRAME};
use dino_runner::horizon::{min_gap, Horizon, HorizonOptions};
use dino_runner::skins::{SkinDefinition, CLASSIC, PRAIRIE};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

struct SpawnLog {
    names: Vec<&'static str>,
    checked_pairs: usize,
}

/// Advance `frames` frames at a constant `speed`, checking each spawn.
fn generate(
    skin: &'static SkinDefinition,
    profile: &DifficultyProfile,
    options: HorizonOptions,
    speed: f64,
    frames: u32,
    seed: u64,
) -> SpawnLog {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut horizon = Horizon::new(skin, 600.0, profile, options, &mut rng);
    let mut log = SpawnLog {
        names: Vec::new(),
        checked_pairs: 0,
    };
    let mut spawned = 0;

    for _ in 0..frames {
        horizon.update(MS_PER_FRAME, speed, true, false, &mut rng);
        if horizon.spawned == spawned {
            continue;
        }
        assert_eq!(horizon.spawned, spawned + 1, "one spawn per frame");
        spawned = horizon.spawned;

        let newest = horizon.obstacles.last().expect("spawned obstacle");
        log.names.push(newest.kind.name);

        let expected_min = min_gap(
            newest.width,
            speed,
            newest.kind.min_gap,
            horizon.gap_coefficient,
        );
        let factor = if options.audio_cues { 2.0 } else { 1.0 };
        assert!(
            newest.gap >= expected_min * factor,
            "{} gap {} below {}",
            newest.kind.name,
            newest.gap,
            expected_min * factor
        );

        if let [.., prev, newest] = horizon.obstacles.as_slice() {
            assert!(
                newest.x >= prev.x + prev.width + prev.gap,
                "{} at {} overlaps the gap of {}",
                newest.kind.name,
                newest.x,
                prev.kind.name
            );
            log.checked_pairs += 1;
        }
    }
    log
}

fn assert_duplication_bound(names: &[&str]) {
    for window in names.windows(MAX_OBSTACLE_DUPLICATION + 1) {
        assert!(
            window.iter().any(|n| *n != window[0]),
            "{} repeated {} times",
            window[0],
            window.len()
        );
    }
}

#[test]
fn test_spawns_respect_gap_at_starting_speed() {
    let log = generate(
        &CLASSIC,
        &DifficultyProfile::normal(),
        HorizonOptions::default(),
        6.0,
        6_000,
        11,
    );
    assert!(log.names.len() > 20);
    assert!(log.checked_pairs > 0);
    assert!(!log.names.contains(&"PTERODACTYL"));
}

#[test]
fn test_spawns_respect_gap_at_top_speed() {
    let profile = DifficultyProfile::normal();
    let log = generate(
        &CLASSIC,
        &profile,
        HorizonOptions::default(),
        profile.max_speed,
        6_000,
        12,
    );
    assert!(log.checked_pairs > 20);
    assert!(log.names.contains(&"PTERODACTYL"));
    assert_duplication_bound(&log.names);
}

#[test]
fn test_audio_cues_double_the_gap() {
    let options = HorizonOptions {
        audio_cues: true,
        ..Default::default()
    };
    let log = generate(&CLASSIC, &DifficultyProfile::normal(), options, 8.0, 4_000, 13);
    assert!(!log.names.is_empty());
}

#[test]
fn test_duplication_bound_across_seeds() {
    for seed in 0..10 {
        let log = generate(
            &CLASSIC,
            &DifficultyProfile::normal(),
            HorizonOptions::default(),
            10.0,
            3_000,
            seed,
        );
        assert_duplication_bound(&log.names);
    }
}

#[test]
fn test_alternate_skin_generation() {
    let options = HorizonOptions {
        alt_mode_enabled: true,
        alt_mode_active: true,
        ..Default::default()
    };
    let log = generate(&PRAIRIE, &DifficultyProfile::normal(), options, 9.0, 4_000, 21);
    assert!(!log.names.is_empty());
    assert_duplication_bound(&log.names);
}

#[test]
fn test_resample_avoids_full_history() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut horizon = Horizon::new(
        &CLASSIC,
        600.0,
        &DifficultyProfile::normal(),
        HorizonOptions::default(),
        &mut rng,
    );
    horizon.history = vec!["CACTUS_SMALL"; MAX_OBSTACLE_DUPLICATION];

    for _ in 0..200 {
        let index = horizon
            .select_obstacle_type(10.0, &mut rng)
            .expect("eligible type");
        assert_ne!(horizon.catalog[index].name, "CACTUS_SMALL");
    }

    horizon.add_new_obstacle(10.0, &mut rng);
    assert_ne!(horizon.history[0], "CACTUS_SMALL");
    assert_eq!(horizon.history.len(), MAX_OBSTACLE_DUPLICATION);
}
