//! Ordered, optionally truncated views over region statistics.
use crate::types::RegionStatistic;
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RankingKey {
    #[default]
    TotalInvestment,
    ActiveProjects,
    TotalProjects,
}

impl RankingKey {
    /// Descending comparison of two regions under this key.
    fn compare(self, a: &RegionStatistic, b: &RegionStatistic) -> Ordering {
        match self {
            RankingKey::TotalInvestment => b
                .total_investment
                .partial_cmp(&a.total_investment)
                .unwrap_or(Ordering::Equal),
            RankingKey::ActiveProjects => b.active_projects.cmp(&a.active_projects),
            RankingKey::TotalProjects => b.total_projects.cmp(&a.total_projects),
        }
    }
}

/// Regions ordered by `key`, highest first, cut to `limit` entries if given.
///
/// The sort is stable over the map's name order, so ties come out
/// alphabetically.
pub fn rank_regions(
    stats: &BTreeMap<String, RegionStatistic>,
    key: RankingKey,
    limit: Option<usize>,
) -> Vec<&RegionStatistic> {
    let mut ranked: Vec<&RegionStatistic> = stats.values().collect();
    ranked.sort_by(|a, b| key.compare(a, b));
    if let Some(n) = limit {
        ranked.truncate(n);
    }
    ranked
}
