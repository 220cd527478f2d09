//! Bucketing of projects by categorical dimensions.
//!
//! Every value of the enumeration shows up in the output, matched or not.
use crate::types::{
    Category, DistributionEntry, InfrastructureCoverage, InfrastructureKind, ProjectRecord,
    ProjectStatus, RiskLevel, YearlyInvestment, ZoneType,
};
use crate::util::percentage;
use chrono::Datelike;
use std::collections::BTreeMap;

/// Count and sum budgets per category value, in `C::ALL` order.
pub fn distribution<C, F>(projects: &[ProjectRecord], key: F) -> Vec<DistributionEntry<C>>
where
    C: Category,
    F: Fn(&ProjectRecord) -> C,
{
    let mut entries: Vec<DistributionEntry<C>> = C::ALL
        .iter()
        .map(|&category| DistributionEntry {
            category,
            count: 0,
            total_investment: 0.0,
            percentage: 0.0,
        })
        .collect();

    for project in projects {
        let category = key(project);
        if let Some(entry) = entries.iter_mut().find(|e| e.category == category) {
            entry.count += 1;
            entry.total_investment += project.budget;
        }
    }

    let total = projects.len();
    for entry in &mut entries {
        entry.percentage = percentage(entry.count, total);
    }
    entries
}

pub fn zone_distribution(projects: &[ProjectRecord]) -> Vec<DistributionEntry<ZoneType>> {
    distribution(projects, |p| p.zone_type)
}

pub fn risk_distribution(projects: &[ProjectRecord]) -> Vec<DistributionEntry<RiskLevel>> {
    distribution(projects, |p| p.risk_level)
}

pub fn status_distribution(projects: &[ProjectRecord]) -> Vec<DistributionEntry<ProjectStatus>> {
    distribution(projects, |p| p.status)
}

/// How many projects have each basic service available.
pub fn infrastructure_coverage(projects: &[ProjectRecord]) -> Vec<InfrastructureCoverage> {
    InfrastructureKind::ALL
        .iter()
        .map(|&kind| {
            let count = projects
                .iter()
                .filter(|p| p.infrastructure.has(kind))
                .count();
            InfrastructureCoverage {
                kind: kind.label(),
                count,
                percentage: percentage(count, projects.len()),
            }
        })
        .collect()
}

/// Project count and investment per start year, oldest first. Projects
/// without a start date are left out.
pub fn yearly_investment(projects: &[ProjectRecord]) -> Vec<YearlyInvestment> {
    let mut by_year: BTreeMap<i32, (usize, f64)> = BTreeMap::new();
    for project in projects {
        if let Some(date) = project.start_date {
            let e = by_year.entry(date.year()).or_insert((0, 0.0));
            e.0 += 1;
            e.1 += project.budget;
        }
    }
    by_year
        .into_iter()
        .map(|(year, (projects, total_investment))| YearlyInvestment {
            year,
            projects,
            total_investment,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Infrastructure;
    use chrono::NaiveDate;

    fn project(zone_type: ZoneType, risk_level: RiskLevel, budget: f64) -> ProjectRecord {
        ProjectRecord {
            id: "p".to_string(),
            title: "Test".to_string(),
            client: String::new(),
            status: ProjectStatus::Planning,
            budget,
            currency: "PEN".to_string(),
            address: "Lima".to_string(),
            location: None,
            zone_type,
            risk_level,
            start_date: None,
            infrastructure: Infrastructure::default(),
        }
    }

    #[test]
    fn zone_distribution_covers_every_zone() {
        let projects = vec![
            project(ZoneType::Urban, RiskLevel::Low, 100.0),
            project(ZoneType::Urban, RiskLevel::High, 300.0),
            project(ZoneType::Rural, RiskLevel::Low, 100.0),
        ];
        let dist = zone_distribution(&projects);
        assert_eq!(dist.len(), ZoneType::ALL.len());

        let urban = &dist[0];
        assert_eq!(urban.category, ZoneType::Urban);
        assert_eq!(urban.count, 2);
        assert_eq!(urban.total_investment, 400.0);
        assert!((urban.percentage - 200.0 / 3.0).abs() < 1e-9);

        let industrial = dist.iter().find(|e| e.category == ZoneType::Industrial).unwrap();
        assert_eq!(industrial.count, 0);
        assert_eq!(industrial.total_investment, 0.0);
        assert_eq!(industrial.percentage, 0.0);
    }

    #[test]
    fn empty_collection_gives_zero_percentages() {
        let dist = risk_distribution(&[]);
        assert_eq!(dist.len(), 4);
        assert!(dist.iter().all(|e| e.count == 0 && e.percentage == 0.0));

        let infra = infrastructure_coverage(&[]);
        assert_eq!(infra.len(), 5);
        assert!(infra.iter().all(|c| c.percentage == 0.0));
    }

    #[test]
    fn status_distribution_sums_to_collection_size() {
        let mut projects = vec![project(ZoneType::Urban, RiskLevel::Low, 1.0); 3];
        projects[1].status = ProjectStatus::Active;
        let dist = status_distribution(&projects);
        assert_eq!(dist.iter().map(|e| e.count).sum::<usize>(), 3);
        assert_eq!(dist[0].count, 2);
    }

    #[test]
    fn infrastructure_coverage_counts_flags() {
        let mut a = project(ZoneType::Urban, RiskLevel::Low, 1.0);
        a.infrastructure.electricity = true;
        a.infrastructure.water = true;
        let mut b = project(ZoneType::Rural, RiskLevel::Low, 1.0);
        b.infrastructure.electricity = true;

        let infra = infrastructure_coverage(&[a, b]);
        assert_eq!(infra[0].kind, "Electricity");
        assert_eq!(infra[0].count, 2);
        assert_eq!(infra[0].percentage, 100.0);
        assert_eq!(infra[1].count, 1);
        assert_eq!(infra[1].percentage, 50.0);
        assert_eq!(infra[4].count, 0);
    }

    #[test]
    fn yearly_investment_skips_undated_projects() {
        let mut a = project(ZoneType::Urban, RiskLevel::Low, 10.0);
        a.start_date = NaiveDate::from_ymd_opt(2023, 5, 1);
        let mut b = project(ZoneType::Urban, RiskLevel::Low, 20.0);
        b.start_date = NaiveDate::from_ymd_opt(2022, 1, 9);
        let mut c = project(ZoneType::Urban, RiskLevel::Low, 5.0);
        c.start_date = NaiveDate::from_ymd_opt(2023, 12, 31);
        let d = project(ZoneType::Urban, RiskLevel::Low, 99.0);

        let trend = yearly_investment(&[a, b, c, d]);
        assert_eq!(
            trend,
            vec![
                YearlyInvestment { year: 2022, projects: 1, total_investment: 20.0 },
                YearlyInvestment { year: 2023, projects: 2, total_investment: 15.0 },
            ]
        );
    }
}
