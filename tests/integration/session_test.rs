use popwatch::core::{Catalog, Config, Cue, CueEvent, RuleConfig, WatchSession};
use popwatch::Metric;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn clips(event: &CueEvent) -> Option<&str> {
    match event {
        CueEvent::Clip { clip, .. } => Some(clip.file.as_str()),
        CueEvent::Beep { .. } => None,
    }
}

#[test]
fn test_replayed_game_fires_each_beat_per_occurrence() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut session = WatchSession::new(Config::default()).unwrap();
    session.navigate("/join/game-1");

    let ticks = [
        "0 / 0",
        "1.2K / 20K",
        "2.6K / 20K",
        "10K / 20K",
        "14K / 20K",
        "9K / 20K",
        "10.2K / 20K",
    ];
    let fired: Vec<Vec<String>> = ticks
        .iter()
        .map(|t| session.tick(t, &mut rng).unwrap().fired)
        .collect();

    assert!(fired[0].is_empty());
    assert!(fired[1].is_empty());
    assert_eq!(fired[2], vec!["start_population"]);
    assert_eq!(fired[3], vec!["fifty_percent"]);
    assert_eq!(fired[4], vec!["seventy_percent"]);
    assert!(fired[5].is_empty());
    assert_eq!(fired[6], vec!["fifty_percent"]);

    assert_eq!(session.teardown(), ticks.len() as u64);
}

#[test]
fn test_specific_clip_missing_from_catalog_is_skipped() {
    let config = Config {
        rules: vec![RuleConfig::new(
            "half",
            Metric::Percentage,
            50.0,
            vec![
                Cue::Clip {
                    file: "nobody_here.mp3".to_string(),
                },
                Cue::RandomClip,
            ],
        )],
        ..Default::default()
    };
    let catalog = Catalog::new(vec!["bob_hi.mp3".to_string()], Vec::new());
    let mut session = WatchSession::with_catalog(config, catalog).unwrap();
    let mut rng = StdRng::seed_from_u64(1);

    let report = session.tick("5 / 10", &mut rng).unwrap();
    let files: Vec<&str> = report.cues.iter().filter_map(clips).collect();
    assert_eq!(files, vec!["bob_hi.mp3"]);
}

#[test]
fn test_visibility_follows_path_and_test_mode() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut session = WatchSession::new(Config::default()).unwrap();

    let report = session.tick("1 / 2", &mut rng).unwrap();
    assert!(!report.visible);

    session.navigate("/join/abc");
    assert!(session.tick("1 / 2", &mut rng).unwrap().visible);

    session.navigate("/lobby");
    assert!(!session.is_visible());
    session.toggle_test_mode(std::time::Instant::now(), &mut rng);
    assert!(session.tick("1 / 2", &mut rng).unwrap().visible);
}

#[test]
fn test_new_game_page_rearms_rules() {
    let mut rng = StdRng::seed_from_u64(6);
    let mut session = WatchSession::new(Config::default()).unwrap();

    session.navigate("/join/one");
    assert_eq!(
        session.tick("6K / 10K", &mut rng).unwrap().fired,
        vec!["start_population", "fifty_percent"]
    );

    assert!(session.navigate("/join/two"));
    assert_eq!(
        session.tick("6K / 10K", &mut rng).unwrap().fired,
        vec!["start_population", "fifty_percent"]
    );
}

#[test]
fn test_tick_report_serializes() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut session = WatchSession::new(Config::default()).unwrap();

    let report = session.tick("5K / 10K", &mut rng).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["percentage"], 50.0);
    assert_eq!(json["fired"][0], "start_population");
    assert_eq!(json["cues"][0]["kind"], "clip");
}
