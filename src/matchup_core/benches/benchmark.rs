use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use matchup_core::matchup::simulate_matchup;
use matchup_core::provider::StaticStatsProvider;
use matchup_core::roster::Roster;
use matchup_core::score::{base_score, compute_score};
use matchup_core::stats::PlayerStatRecord;

fn create_test_record() -> PlayerStatRecord {
    PlayerStatRecord::from_pairs([
        ("GP", 70.0),
        ("MIN", 2500.0),
        ("PTS", 1800.0),
        ("REB", 550.0),
        ("AST", 500.0),
        ("STL", 90.0),
        ("BLK", 50.0),
        ("FG_PCT", 0.5),
        ("FT_PCT", 0.8),
        ("FG3_PCT", 0.35),
        ("TOV", 230.0),
    ])
}

fn create_league() -> (StaticStatsProvider, Roster, Roster) {
    let mut provider = StaticStatsProvider::default();
    let mut names = Vec::new();

    for i in 0..10 {
        let name = format!("Player{}", i);
        let scale = 0.8 + i as f64 * 0.05;
        let record = PlayerStatRecord::from_pairs(
            create_test_record().iter().map(|(k, v)| (k.to_string(), v * scale)),
        );
        provider.add_player(i + 1, &name, record);
        names.push(name);
    }

    let team_a = Roster::new(names[..5].to_vec()).unwrap();
    let team_b = Roster::new(names[5..].to_vec()).unwrap();
    (provider, team_a, team_b)
}

fn bench_base_score(c: &mut Criterion) {
    let record = create_test_record();

    c.bench_function("base_score", |b| b.iter(|| base_score(black_box(&record))));
}

fn bench_compute_score(c: &mut Criterion) {
    let record = create_test_record();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    c.bench_function("compute_score", |b| {
        b.iter(|| compute_score(black_box(&record), &mut rng))
    });
}

fn bench_simulate_matchup(c: &mut Criterion) {
    let (provider, team_a, team_b) = create_league();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    c.bench_function("simulate_matchup_static", |b| {
        b.iter(|| simulate_matchup(&provider, black_box(&team_a), black_box(&team_b), &mut rng))
    });
}

criterion_group!(benches, bench_base_score, bench_compute_score, bench_simulate_matchup);
criterion_main!(benches);
