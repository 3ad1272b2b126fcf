// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{BandSizes, DomainError, LadderPlacement, MovementPolicy, MovementType};

fn bands(policy: &MovementPolicy, size: u32, placement: LadderPlacement) -> Vec<MovementType> {
    (1..=size)
        .map(|position| policy.band_at(position, size, placement).unwrap())
        .collect()
}

#[test]
fn test_default_policy_eight_players() {
    let policy: MovementPolicy = MovementPolicy::default();
    let movements: Vec<MovementType> = bands(&policy, 8, LadderPlacement::Middle);

    assert_eq!(
        movements,
        vec![
            MovementType::Promotion,
            MovementType::Promotion,
            MovementType::Stay,
            MovementType::Stay,
            MovementType::Stay,
            MovementType::Stay,
            MovementType::Relegation,
            MovementType::Relegation,
        ]
    );
}

#[test]
fn test_small_group_moves_at_most_one_each_way() {
    let policy: MovementPolicy = MovementPolicy::default();

    assert_eq!(
        bands(&policy, 4, LadderPlacement::Middle),
        vec![
            MovementType::Promotion,
            MovementType::Stay,
            MovementType::Stay,
            MovementType::Relegation,
        ]
    );
    assert_eq!(
        policy.band_sizes(5, LadderPlacement::Middle),
        BandSizes {
            promoted: 2,
            relegated: 2
        }
    );
}

#[test]
fn test_relegation_band_shrinks_first() {
    let policy: MovementPolicy = MovementPolicy::default();
    assert_eq!(
        policy.band_sizes(1, LadderPlacement::Middle),
        BandSizes {
            promoted: 1,
            relegated: 0
        }
    );

    let wide: MovementPolicy = MovementPolicy {
        promote_slots: 5,
        relegate_slots: 5,
        small_group_max: 0,
        hold_ladder_ends: false,
    };
    assert_eq!(
        wide.band_sizes(6, LadderPlacement::Middle),
        BandSizes {
            promoted: 5,
            relegated: 1
        }
    );
    assert_eq!(
        wide.band_sizes(3, LadderPlacement::Middle),
        BandSizes {
            promoted: 3,
            relegated: 0
        }
    );
}

#[test]
fn test_bands_partition_every_group_size() {
    let policies: [MovementPolicy; 3] = [
        MovementPolicy::default(),
        MovementPolicy {
            promote_slots: 3,
            relegate_slots: 1,
            small_group_max: 2,
            hold_ladder_ends: false,
        },
        MovementPolicy {
            promote_slots: 4,
            relegate_slots: 4,
            small_group_max: 0,
            hold_ladder_ends: true,
        },
    ];
    let placements: [LadderPlacement; 4] = [
        LadderPlacement::Only,
        LadderPlacement::Top,
        LadderPlacement::Middle,
        LadderPlacement::Bottom,
    ];

    for policy in &policies {
        for placement in placements {
            for size in 1..=20 {
                let movements: Vec<MovementType> = bands(policy, size, placement);
                assert_eq!(movements.len(), size as usize);

                // Promotions first, stays next, relegations last.
                let rank = |movement: &MovementType| match movement {
                    MovementType::Promotion => 0,
                    MovementType::Stay => 1,
                    MovementType::Relegation => 2,
                };
                assert!(movements.windows(2).all(|w| rank(&w[0]) <= rank(&w[1])));

                let sizes: BandSizes = policy.band_sizes(size, placement);
                let promoted: usize = movements
                    .iter()
                    .filter(|m| **m == MovementType::Promotion)
                    .count();
                let relegated: usize = movements
                    .iter()
                    .filter(|m| **m == MovementType::Relegation)
                    .count();
                assert_eq!(promoted, sizes.promoted as usize);
                assert_eq!(relegated, sizes.relegated as usize);
                assert!(sizes.promoted + sizes.relegated <= size);
            }
        }
    }
}

#[test]
fn test_hold_ladder_ends() {
    let policy: MovementPolicy = MovementPolicy {
        hold_ladder_ends: true,
        ..MovementPolicy::default()
    };

    let top: Vec<MovementType> = bands(&policy, 6, LadderPlacement::Top);
    assert!(!top.contains(&MovementType::Promotion));
    assert_eq!(top[5], MovementType::Relegation);

    let bottom: Vec<MovementType> = bands(&policy, 6, LadderPlacement::Bottom);
    assert!(!bottom.contains(&MovementType::Relegation));
    assert_eq!(bottom[0], MovementType::Promotion);

    let only: Vec<MovementType> = bands(&policy, 6, LadderPlacement::Only);
    assert!(only.iter().all(|m| *m == MovementType::Stay));
}

#[test]
fn test_ladder_ends_ignored_by_default() {
    let policy: MovementPolicy = MovementPolicy::default();
    assert_eq!(
        policy.band_at(1, 6, LadderPlacement::Top).unwrap(),
        MovementType::Promotion
    );
    assert_eq!(
        policy.band_at(6, 6, LadderPlacement::Bottom).unwrap(),
        MovementType::Relegation
    );
}

#[test]
fn test_positions_outside_group_rejected() {
    let policy: MovementPolicy = MovementPolicy::default();

    assert_eq!(
        policy.band(0, 8),
        Err(DomainError::InvalidRankPosition {
            position: 0,
            group_size: 8
        })
    );
    assert_eq!(
        policy.band(9, 8),
        Err(DomainError::InvalidRankPosition {
            position: 9,
            group_size: 8
        })
    );
    assert!(policy.band(1, 0).is_err());
}

#[test]
fn test_ladder_placement_of() {
    assert_eq!(LadderPlacement::of(0, 1), LadderPlacement::Only);
    assert_eq!(LadderPlacement::of(0, 3), LadderPlacement::Top);
    assert_eq!(LadderPlacement::of(1, 3), LadderPlacement::Middle);
    assert_eq!(LadderPlacement::of(2, 3), LadderPlacement::Bottom);
}
