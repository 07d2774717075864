//! End-to-end solves with the `microlp` backend, checked against
//! exhaustive enumeration of every per-league HAP permutation.

use mlsp::evaluation::{is_league_bijection, ViolationProfile};
use mlsp::formulation::ModelBuilder;
use mlsp::generator::generate;
use mlsp::hap_table::HapTable;
use mlsp::io::{read_instance, report_file_name, save_instance, save_report, FileHapTable};
use mlsp::models::{Club, Instance};
use mlsp::optimizer::MicroLpOptimizer;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn hap_table() -> FileHapTable {
    FileHapTable::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data/hapsets"))
}

fn permutations(n: usize) -> Vec<Vec<usize>> {
    fn step(items: &mut Vec<usize>, k: usize, out: &mut Vec<Vec<usize>>) {
        if k == items.len() {
            out.push(items.clone());
            return;
        }
        for i in k..items.len() {
            items.swap(k, i);
            step(items, k + 1, out);
            items.swap(k, i);
        }
    }
    let mut items: Vec<usize> = (0..n).collect();
    let mut out = Vec::new();
    step(&mut items, 0, &mut out);
    out
}

fn brute_force(instance: &Instance) -> u32 {
    fn search(
        instance: &Instance,
        perms: &[Vec<usize>],
        league: usize,
        assignment: &mut Vec<usize>,
    ) -> u32 {
        if league == instance.num_leagues() {
            return ViolationProfile::calculate(instance, assignment).total;
        }
        let mut best = u32::MAX;
        for perm in perms {
            for (pos, &team) in instance.leagues()[league].teams.iter().enumerate() {
                assignment[team] = perm[pos];
            }
            best = best.min(search(instance, perms, league + 1, assignment));
        }
        best
    }
    let perms = permutations(instance.league_size());
    let mut assignment = vec![0; instance.num_teams()];
    search(instance, &perms, 0, &mut assignment)
}

/// Instance from the first seed at or after `seed` that leaves no club empty.
fn generated(league_size: usize, leagues: usize, clubs: usize, seed: u64) -> Instance {
    (seed..seed + 100)
        .find_map(|s| {
            let mut rng = StdRng::seed_from_u64(s);
            generate(league_size, leagues, clubs, &hap_table(), &mut rng).ok()
        })
        .unwrap()
}

fn assert_optimal(instance: &Instance) {
    let solution = ModelBuilder::new(instance)
        .solve(&MicroLpOptimizer::new())
        .unwrap();

    assert!(is_league_bijection(instance, solution.assignment()));
    let profile = ViolationProfile::calculate(instance, solution.assignment());
    assert_eq!(profile.excess, solution.violations());
    assert_eq!(solution.total_violations(), brute_force(instance));
    assert!((solution.objective() - f64::from(solution.total_violations())).abs() < 1e-6);
    assert_eq!(solution.optimizer(), "microlp");
}

#[test]
fn test_two_clubs_one_league_is_violation_free() {
    let instance = Instance::new(
        vec![vec![0, 1, 2, 3]],
        vec![
            Club::new(0).with_capacity(1).with_teams([0, 1]),
            Club::new(1).with_capacity(1).with_teams([2, 3]),
        ],
        hap_table().hap_set(4).unwrap(),
    )
    .unwrap();

    assert_eq!(permutations(4).len(), 24);
    assert_eq!(brute_force(&instance), 0);
    assert_optimal(&instance);
}

#[test]
fn test_shared_club_across_three_leagues_has_positive_optimum() {
    // Club 0 hosts the first team of each league with capacity 1; every
    // other team has a club of its own.
    let mut clubs = vec![Club::new(0).with_capacity(1).with_teams([0, 4, 8])];
    for team in [1, 2, 3, 5, 6, 7, 9, 10, 11] {
        clubs.push(Club::new(clubs.len()).with_capacity(1).with_teams([team]));
    }
    let instance = Instance::new(
        vec![vec![0, 1, 2, 3], vec![4, 5, 6, 7], vec![8, 9, 10, 11]],
        clubs,
        hap_table().hap_set(4).unwrap(),
    )
    .unwrap();

    // Three teams each home in half of six rounds: 9 home games, at most
    // one per round without excess.
    assert_eq!(brute_force(&instance), 3);
    assert_optimal(&instance);

    let solution = ModelBuilder::new(&instance)
        .solve(&MicroLpOptimizer::new())
        .unwrap();
    assert_eq!(solution.club_violations(0), 3);
    assert!(solution.violations()[0].iter().any(|&z| z > 0));
    assert!((1..instance.num_clubs()).all(|c| solution.club_violations(c) == 0));
}

#[test]
fn test_generated_two_leagues_of_four() {
    let instance = generated(4, 2, 5, 2024);
    assert_optimal(&instance);
}

#[test]
fn test_one_league_of_six() {
    let instance = Instance::new(
        vec![vec![0, 1, 2, 3, 4, 5]],
        vec![
            Club::new(0).with_capacity(1).with_teams([0, 1, 2]),
            Club::new(1).with_capacity(1).with_teams([3, 4]),
            Club::new(2).with_capacity(1).with_teams([5]),
        ],
        hap_table().hap_set(6).unwrap(),
    )
    .unwrap();
    assert_optimal(&instance);
}

#[test]
fn test_generate_save_read_solve_report() {
    let dir = tempfile::tempdir().unwrap();
    let instance = generated(4, 3, 5, 5);

    let instance_path = dir.path().join("4-3-5-A.txt");
    save_instance(&instance, &instance_path).unwrap();
    let loaded = read_instance(&instance_path).unwrap();
    assert_eq!(loaded, instance);

    let solution = ModelBuilder::new(&loaded)
        .solve(&MicroLpOptimizer::new())
        .unwrap();
    let report_path = dir.path().join(report_file_name("4-3-5-A.txt"));
    save_report(&solution, &report_path).unwrap();

    let report = std::fs::read_to_string(&report_path).unwrap();
    let first = report.lines().next().unwrap();
    assert!(first.ends_with(&format!(": {}", solution.total_violations())));
    assert_eq!(
        report.lines().count(),
        7 + instance.num_clubs() + instance.num_teams()
    );
}
