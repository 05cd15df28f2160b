use popwatch::core::Catalog;
use popwatch::{history_limit, pick_next, ClipRotation};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;

#[test]
fn test_builtin_catalog_rotation_has_no_short_repeats() {
    let catalog = Catalog::builtin();
    let mut rotation = ClipRotation::new(catalog.clips().to_vec());
    let mut rng = StdRng::seed_from_u64(2024);
    assert_eq!(rotation.max_history(), history_limit(catalog.clips().len()));

    let picks: Vec<String> = (0..200)
        .map(|_| rotation.next_clip(&mut rng).unwrap())
        .collect();

    let window = rotation.max_history() + 1;
    for chunk in picks.windows(window) {
        let mut sorted = chunk.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), window);
    }
}

#[test]
fn test_every_clip_eventually_plays() {
    let catalog = Catalog::builtin();
    let mut rotation = ClipRotation::new(catalog.clips().to_vec());
    let mut rng = StdRng::seed_from_u64(77);

    let mut seen: Vec<String> = (0..400)
        .map(|_| rotation.next_clip(&mut rng).unwrap())
        .collect();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), catalog.clips().len());
}

#[test]
fn test_tiny_catalogs_fall_back() {
    let mut rng = StdRng::seed_from_u64(0);

    let one = vec!["only.mp3"];
    let mut recent = VecDeque::new();
    for _ in 0..5 {
        assert_eq!(pick_next(&one, &mut recent, history_limit(1), &mut rng), Some("only.mp3"));
    }

    let empty: Vec<&str> = Vec::new();
    assert_eq!(pick_next(&empty, &mut recent, 0, &mut rng), None);
}

#[test]
fn test_small_catalogs_always_pick_within_bounds() {
    let mut rng = StdRng::seed_from_u64(31);

    for n in 2..=6 {
        let catalog: Vec<String> = (0..n).map(|i| format!("clip_{}.mp3", i)).collect();
        let limit = history_limit(n);
        let mut recent = VecDeque::new();
        let mut previous: Option<String> = None;

        for _ in 0..100 {
            let pick = pick_next(&catalog, &mut recent, limit, &mut rng)
                .unwrap_or_else(|| panic!("no pick for catalog of {}", n));
            assert!(catalog.contains(&pick));
            assert!(recent.len() <= limit, "history {} over limit {}", recent.len(), limit);
            assert_ne!(previous.as_ref(), Some(&pick), "immediate repeat with {} clips", n);
            previous = Some(pick);
        }
    }
}

#[test]
fn test_history_as_large_as_catalog_still_picks() {
    let mut rng = StdRng::seed_from_u64(8);

    for n in 2..=6 {
        let catalog: Vec<String> = (0..n).map(|i| format!("clip_{}.mp3", i)).collect();
        let mut recent = VecDeque::new();

        for _ in 0..50 {
            let pick = pick_next(&catalog, &mut recent, n, &mut rng);
            assert!(pick.is_some_and(|p| catalog.contains(&p)));
            assert!(recent.len() <= n);
        }
    }
}
