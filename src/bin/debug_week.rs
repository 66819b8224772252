//! Debug script: simulate one representative week and print it as ASCII

use std::path::PathBuf;

use household_occupancy::chronology::DayType;
use household_occupancy::occupancy::{
    reduce, DayRunEngine, MemberClusters, ValidationRules, WeekAssembler, BINS_PER_DAY,
    MINUTES_PER_BIN,
};
use household_occupancy::Datasets;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn state_char(state: u8) -> char {
    match state {
        1 => '#',
        2 => 'z',
        3 => '.',
        _ => '?',
    }
}

fn main() {
    let mut args = std::env::args().skip(1);
    let label = args.next().unwrap_or_else(|| "FTE".to_string());
    let data_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("data/demo"));
    let seed = 12345u64;

    let datasets = match Datasets::load_from(&data_dir) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut pick = |day_type: DayType| {
        let id = datasets
            .clusters
            .sample_cluster(day_type, &label, &mut rng)
            .map(str::to_string);
        let model = id.as_deref().and_then(|id| datasets.clusters.model(id)).cloned();
        match (id, model) {
            (Some(id), Some(model)) => (id, model),
            _ => {
                eprintln!("no {} clusters for member type {}", day_type, label);
                std::process::exit(1);
            }
        }
    };
    let (weekday_id, weekday) = pick(DayType::Weekday);
    let (saturday_id, saturday) = pick(DayType::Saturday);
    let (sunday_id, sunday) = pick(DayType::Sunday);
    let clusters = MemberClusters { weekday, saturday, sunday };

    let engine = DayRunEngine::new(ValidationRules::default());
    let week = WeekAssembler::new(&engine).build_week(&clusters, &mut rng);

    println!("=== WEEK DEBUG ({}) seed={} ===", label, seed);
    println!("LEGEND: # = active at home   z = asleep/low activity   . = away");
    println!();

    let bins_per_6h = 6 * 60 / MINUTES_PER_BIN;
    let hours: String = (0..BINS_PER_DAY / bins_per_6h)
        .map(|i| format!("{:<width$}", format!("{:02}h", i * 6), width = bins_per_6h))
        .collect();
    println!("{:<10} {:<10} {}", "", "", hours);

    for (day_type, id) in [
        (DayType::Weekday, &weekday_id),
        (DayType::Saturday, &saturday_id),
        (DayType::Sunday, &sunday_id),
    ] {
        let day = week.day(day_type);
        let row: String = day.states().iter().map(|&s| state_char(s)).collect();
        println!("{:<10} {:<10} {}", day_type.name(), id, row);
        println!(
            "{:<10} {:<10} reduced {:?}, cluster {:?}",
            "",
            "",
            reduce(day.states()),
            clusters.get(day_type).red
        );
    }

    println!();
    println!("Attempts: {}", week.attempts);
    if week.fallback_days.is_empty() {
        println!("All days matched their cluster");
    } else {
        println!("Deadline fallbacks: {:?}", week.fallback_days);
    }
}
