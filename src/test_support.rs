//! Shared fixtures for unit tests.

use crate::evaluation::ViolationProfile;
use crate::models::{Club, HapSet, Instance};

/// Complementary HAP set for 4 teams (6 rounds).
pub(crate) fn hap4() -> HapSet {
    HapSet::new(vec![
        vec![1, 0, 1, 0, 1, 0],
        vec![1, 0, 0, 0, 1, 1],
        vec![0, 1, 1, 1, 0, 0],
        vec![0, 1, 0, 1, 0, 1],
    ])
    .unwrap()
}

/// Complementary HAP set for 6 teams (10 rounds).
pub(crate) fn hap6() -> HapSet {
    HapSet::new(vec![
        vec![1, 0, 1, 0, 1, 0, 1, 0, 1, 0],
        vec![1, 0, 0, 1, 0, 0, 1, 1, 0, 1],
        vec![0, 1, 1, 0, 1, 1, 0, 0, 1, 0],
        vec![1, 0, 1, 0, 0, 0, 1, 0, 1, 1],
        vec![0, 1, 0, 1, 1, 1, 0, 1, 0, 0],
        vec![0, 1, 0, 1, 0, 1, 0, 1, 0, 1],
    ])
    .unwrap()
}

/// One league of 4 teams split into clubs {0, 1} and {2, 3}, capacity 1 each.
pub(crate) fn scenario_instance() -> Instance {
    Instance::new(
        vec![vec![0, 1, 2, 3]],
        vec![
            Club::new(0).with_capacity(1).with_teams([0, 1]),
            Club::new(1).with_capacity(1).with_teams([2, 3]),
        ],
        hap4(),
    )
    .unwrap()
}

/// Minimum total violation over every per-league slot permutation.
pub(crate) fn brute_force_optimum(instance: &Instance) -> u32 {
    let n = instance.league_size();
    let mut slots: Vec<usize> = (0..n).collect();
    let mut perms = Vec::new();
    permutations(&mut slots, 0, &mut perms);

    let mut assignment = vec![0; instance.num_teams()];
    let mut best = u32::MAX;
    search(instance, &perms, 0, &mut assignment, &mut best);
    best
}

fn permutations(items: &mut Vec<usize>, k: usize, out: &mut Vec<Vec<usize>>) {
    if k == items.len() {
        out.push(items.clone());
        return;
    }
    for i in k..items.len() {
        items.swap(k, i);
        permutations(items, k + 1, out);
        items.swap(k, i);
    }
}

fn search(
    instance: &Instance,
    perms: &[Vec<usize>],
    league: usize,
    assignment: &mut Vec<usize>,
    best: &mut u32,
) {
    if league == instance.num_leagues() {
        *best = (*best).min(ViolationProfile::calculate(instance, assignment).total);
        return;
    }
    for perm in perms {
        for (pos, &team) in instance.leagues()[league].teams.iter().enumerate() {
            assignment[team] = perm[pos];
        }
        search(instance, perms, league + 1, assignment, best);
    }
}
