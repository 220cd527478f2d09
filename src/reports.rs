//! Presentation rows built from the aggregation outputs.
//!
//! Everything here is formatting: numbers become display strings, the core
//! values come from `aggregate`, `distribution` and `ranking`.
use crate::aggregate::portfolio_totals;
use crate::ranking::{rank_regions, RankingKey};
use crate::types::{
    Category, DistributionEntry, DistributionRow, InfrastructureCoverage, InfrastructureRow,
    RegionRankingRow, RegionStatistic, RegionSummaryRow, SummaryStats, YearlyInvestment,
    YearlyTrendRow,
};
use crate::util::{format_currency, format_number, format_optional_currency, format_percent};
use std::collections::BTreeMap;

/// One row per region, largest investment first.
pub fn region_summary(
    stats: &BTreeMap<String, RegionStatistic>,
    currency: &str,
) -> Vec<RegionSummaryRow> {
    rank_regions(stats, RankingKey::TotalInvestment, None)
        .into_iter()
        .map(|s| RegionSummaryRow {
            region: s.region.clone(),
            total_projects: s.total_projects,
            active_projects: s.active_projects,
            completed_projects: s.completed_projects,
            total_investment: format_currency(s.total_investment, currency),
            average_project_value: format_optional_currency(s.average_project_value, currency),
            centroid: s
                .centroid
                .map(|c| format!("{}, {}", format_number(c.lat, 4), format_number(c.lon, 4)))
                .unwrap_or_else(|| "—".to_string()),
        })
        .collect()
}

pub fn top_regions(
    stats: &BTreeMap<String, RegionStatistic>,
    key: RankingKey,
    n: usize,
    currency: &str,
) -> Vec<RegionRankingRow> {
    rank_regions(stats, key, Some(n))
        .into_iter()
        .enumerate()
        .map(|(idx, s)| RegionRankingRow {
            rank: idx + 1,
            region: s.region.clone(),
            active_projects: s.active_projects,
            total_projects: s.total_projects,
            total_investment: format_currency(s.total_investment, currency),
        })
        .collect()
}

pub fn distribution_rows<C: Category>(
    entries: &[DistributionEntry<C>],
    currency: &str,
) -> Vec<DistributionRow> {
    entries
        .iter()
        .map(|e| DistributionRow {
            category: e.category.label().to_string(),
            count: e.count,
            percentage: format_percent(e.percentage),
            total_investment: format_currency(e.total_investment, currency),
        })
        .collect()
}

pub fn infrastructure_rows(coverage: &[InfrastructureCoverage]) -> Vec<InfrastructureRow> {
    coverage
        .iter()
        .map(|c| InfrastructureRow {
            service: c.kind.to_string(),
            count: c.count,
            percentage: format_percent(c.percentage),
        })
        .collect()
}

pub fn yearly_trend_rows(trend: &[YearlyInvestment], currency: &str) -> Vec<YearlyTrendRow> {
    trend
        .iter()
        .map(|y| YearlyTrendRow {
            year: y.year,
            projects: y.projects,
            total_investment: format_currency(y.total_investment, currency),
        })
        .collect()
}

pub fn generate_summary(stats: &BTreeMap<String, RegionStatistic>) -> SummaryStats {
    let totals = portfolio_totals(stats);
    let top_region = rank_regions(stats, RankingKey::TotalInvestment, Some(1))
        .first()
        .map(|s| s.region.clone());
    SummaryStats {
        total_projects: totals.total_projects,
        active_projects: totals.active_projects,
        completed_projects: totals.completed_projects,
        total_regions: totals.regions_with_projects,
        total_investment: totals.total_investment,
        avg_project_value: totals.average_project_value,
        top_region,
    }
}
