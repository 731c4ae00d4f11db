//! Packing queue priority tests

use proptest::prelude::*;
use shared::{priority_score, rank_for_packing, PackingCandidate, StockLevel, StockTier};

#[test]
fn test_most_urgent_first() {
    let ranked = rank_for_packing(vec![
        PackingCandidate {
            name: "SUN-100G".to_string(),
            level: StockLevel::new(150.0, 200.0, 800.0),
        },
        PackingCandidate {
            name: "SUN-25G".to_string(),
            level: StockLevel::new(50.0, 500.0, 2000.0),
        },
    ]);

    assert_eq!(ranked[0].name, "SUN-25G");
    assert_eq!(ranked[0].status, StockTier::Critical);
    assert_eq!(ranked[1].status, StockTier::BelowMin);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Scores of a more urgent tier always beat a less urgent one
    #[test]
    fn prop_tier_dominates_score(min in 10f64..1e4, a in 0f64..2.0, b in 0f64..2.0) {
        let la = StockLevel::new(min * a, min, min * 4.0);
        let lb = StockLevel::new(min * b, min, min * 4.0);
        if la.tier().priority_rank() > lb.tier().priority_rank() {
            prop_assert!(priority_score(&la) > priority_score(&lb));
        }
    }

    /// Ranking returns every candidate in non-increasing score order among known tiers
    #[test]
    fn prop_ranking_is_sorted(qtys in prop::collection::vec(0f64..2000.0, 1..20)) {
        let candidates: Vec<PackingCandidate> = qtys
            .iter()
            .enumerate()
            .map(|(i, q)| PackingCandidate {
                name: format!("SKU-{i:02}"),
                level: StockLevel::new(*q, 100.0, 500.0),
            })
            .collect();
        let ranked = rank_for_packing(candidates);

        prop_assert_eq!(ranked.len(), qtys.len());
        prop_assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }
}
