//! Per-region rollups of a project collection.
//!
//! Every project lands in exactly one bucket (possibly the catch-all one),
//! so the bucket totals always add back up to the input.
use crate::region::resolve_region;
use crate::types::{GeoPoint, PortfolioTotals, ProjectRecord, ProjectStatus, RegionStatistic};
use crate::util::safe_div;
use std::collections::BTreeMap;

#[derive(Default)]
struct Acc {
    total: usize,
    active: usize,
    completed: usize,
    investment: f64,
    lat_sum: f64,
    lon_sum: f64,
    located: usize,
}

impl Acc {
    fn push(&mut self, project: &ProjectRecord) {
        self.total += 1;
        match project.status {
            ProjectStatus::Active => self.active += 1,
            ProjectStatus::Completed => self.completed += 1,
            ProjectStatus::Planning | ProjectStatus::Paused | ProjectStatus::Cancelled => {}
        }
        self.investment += project.budget;
        if let Some(point) = project.location {
            self.lat_sum += point.lat;
            self.lon_sum += point.lon;
            self.located += 1;
        }
    }

    fn finish(self, region: String) -> RegionStatistic {
        let centroid = match (
            safe_div(self.lat_sum, self.located as f64),
            safe_div(self.lon_sum, self.located as f64),
        ) {
            (Some(lat), Some(lon)) => Some(GeoPoint { lat, lon }),
            _ => None,
        };
        RegionStatistic {
            region,
            total_projects: self.total,
            active_projects: self.active,
            completed_projects: self.completed,
            total_investment: self.investment,
            average_project_value: safe_div(self.investment, self.total as f64),
            centroid,
        }
    }
}

/// Fold `projects` into one [`RegionStatistic`] per resolved region.
///
/// The result is keyed (and iterated) by region name. Regions that receive
/// no project are absent.
pub fn aggregate_by_region<S: AsRef<str>>(
    projects: &[ProjectRecord],
    regions: &[S],
) -> BTreeMap<String, RegionStatistic> {
    let mut buckets: BTreeMap<&str, Acc> = BTreeMap::new();
    for project in projects {
        let region = resolve_region(&project.address, regions);
        buckets.entry(region).or_default().push(project);
    }
    log::debug!(
        "aggregated {} projects into {} regions",
        projects.len(),
        buckets.len()
    );
    buckets
        .into_iter()
        .map(|(region, acc)| (region.to_string(), acc.finish(region.to_string())))
        .collect()
}

/// Portfolio-wide totals, independent of region resolution except for the
/// count of distinct regions touched.
pub fn portfolio_totals(stats: &BTreeMap<String, RegionStatistic>) -> PortfolioTotals {
    let total_projects: usize = stats.values().map(|s| s.total_projects).sum();
    let total_investment: f64 = stats.values().map(|s| s.total_investment).sum();
    PortfolioTotals {
        total_projects,
        active_projects: stats.values().map(|s| s.active_projects).sum(),
        completed_projects: stats.values().map(|s| s.completed_projects).sum(),
        total_investment,
        average_project_value: safe_div(total_investment, total_projects as f64),
        regions_with_projects: stats.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{DEFAULT_REGIONS, OTHER_REGION};
    use crate::types::{Infrastructure, RiskLevel, ZoneType};
    use pretty_assertions::assert_eq;

    fn project(address: &str, status: ProjectStatus, budget: f64) -> ProjectRecord {
        ProjectRecord {
            id: address.to_string(),
            title: "Test".to_string(),
            client: "Client".to_string(),
            status,
            budget,
            currency: "PEN".to_string(),
            address: address.to_string(),
            location: None,
            zone_type: ZoneType::Urban,
            risk_level: RiskLevel::Low,
            start_date: None,
            infrastructure: Infrastructure::default(),
        }
    }

    #[test]
    fn lima_and_arequipa_rollup() {
        let projects = vec![
            project("Av. Larco 100, Lima", ProjectStatus::Active, 100_000.0),
            project("Jr. Puno 20, Lima", ProjectStatus::Completed, 50_000.0),
            project("Calle Mercaderes, Arequipa", ProjectStatus::Active, 75_000.0),
        ];
        let stats = aggregate_by_region(&projects, DEFAULT_REGIONS);

        assert_eq!(
            stats["Lima"],
            RegionStatistic {
                region: "Lima".to_string(),
                total_projects: 2,
                active_projects: 1,
                completed_projects: 1,
                total_investment: 150_000.0,
                average_project_value: Some(75_000.0),
                centroid: None,
            }
        );
        assert_eq!(
            stats["Arequipa"],
            RegionStatistic {
                region: "Arequipa".to_string(),
                total_projects: 1,
                active_projects: 1,
                completed_projects: 0,
                total_investment: 75_000.0,
                average_project_value: Some(75_000.0),
                centroid: None,
            }
        );
        assert_eq!(stats.len(), 2);
    }

    #[test]
    fn unmatched_addresses_go_to_other_bucket() {
        let projects = vec![
            project("Somewhere else", ProjectStatus::Paused, 10.0),
            project("", ProjectStatus::Planning, 5.0),
        ];
        let stats = aggregate_by_region(&projects, DEFAULT_REGIONS);
        let other = &stats[OTHER_REGION];
        assert_eq!(other.total_projects, 2);
        assert_eq!(other.active_projects + other.completed_projects, 0);
        assert_eq!(other.total_investment, 15.0);
    }

    #[test]
    fn empty_collection_yields_no_buckets() {
        let stats = aggregate_by_region(&[], DEFAULT_REGIONS);
        assert!(stats.is_empty());

        let totals = portfolio_totals(&stats);
        assert_eq!(totals.total_projects, 0);
        assert_eq!(totals.total_investment, 0.0);
        assert_eq!(totals.average_project_value, None);
    }

    #[test]
    fn centroid_uses_only_located_projects() {
        let mut a = project("Cusco centro", ProjectStatus::Active, 1.0);
        a.location = Some(GeoPoint { lat: -13.0, lon: -72.0 });
        let mut b = project("San Blas, Cusco", ProjectStatus::Active, 1.0);
        b.location = Some(GeoPoint { lat: -14.0, lon: -71.0 });
        let c = project("Wanchaq, Cusco", ProjectStatus::Active, 1.0);

        let stats = aggregate_by_region(&[a, b, c], DEFAULT_REGIONS);
        assert_eq!(stats["Cusco"].centroid, Some(GeoPoint { lat: -13.5, lon: -71.5 }));
    }

    #[test]
    fn totals_match_bucket_sums() {
        let projects = vec![
            project("Lima", ProjectStatus::Active, 10.0),
            project("Piura", ProjectStatus::Completed, 30.0),
            project("Tacna", ProjectStatus::Cancelled, 20.0),
        ];
        let totals = portfolio_totals(&aggregate_by_region(&projects, DEFAULT_REGIONS));
        assert_eq!(totals.total_projects, 3);
        assert_eq!(totals.active_projects, 1);
        assert_eq!(totals.completed_projects, 1);
        assert_eq!(totals.total_investment, 60.0);
        assert_eq!(totals.average_project_value, Some(20.0));
        assert_eq!(totals.regions_with_projects, 3);
    }
}
