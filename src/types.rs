use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tabled::Tabled;

/// A closed set of categorical values that can be bucketed by the
/// distribution calculator.
pub trait Category: Copy + Eq + 'static {
    /// Every value, in presentation order.
    const ALL: &'static [Self];

    fn label(self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Planning,
    Active,
    Completed,
    Paused,
    #[serde(alias = "canceled")]
    Cancelled,
}

impl Category for ProjectStatus {
    const ALL: &'static [Self] = &[
        ProjectStatus::Planning,
        ProjectStatus::Active,
        ProjectStatus::Completed,
        ProjectStatus::Paused,
        ProjectStatus::Cancelled,
    ];

    fn label(self) -> &'static str {
        match self {
            ProjectStatus::Planning => "Planning",
            ProjectStatus::Active => "Active",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::Paused => "Paused",
            ProjectStatus::Cancelled => "Cancelled",
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "planning" => Ok(ProjectStatus::Planning),
            "active" => Ok(ProjectStatus::Active),
            "completed" => Ok(ProjectStatus::Completed),
            "paused" => Ok(ProjectStatus::Paused),
            "cancelled" | "canceled" => Ok(ProjectStatus::Cancelled),
            _ => Err(UnknownVariant::new("status", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneType {
    Urban,
    Rural,
    Industrial,
    Commercial,
    Residential,
}

impl Category for ZoneType {
    const ALL: &'static [Self] = &[
        ZoneType::Urban,
        ZoneType::Rural,
        ZoneType::Industrial,
        ZoneType::Commercial,
        ZoneType::Residential,
    ];

    fn label(self) -> &'static str {
        match self {
            ZoneType::Urban => "Urban",
            ZoneType::Rural => "Rural",
            ZoneType::Industrial => "Industrial",
            ZoneType::Commercial => "Commercial",
            ZoneType::Residential => "Residential",
        }
    }
}

impl FromStr for ZoneType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "urban" => Ok(ZoneType::Urban),
            "rural" => Ok(ZoneType::Rural),
            "industrial" => Ok(ZoneType::Industrial),
            "commercial" => Ok(ZoneType::Commercial),
            "residential" => Ok(ZoneType::Residential),
            _ => Err(UnknownVariant::new("zone type", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl Category for RiskLevel {
    const ALL: &'static [Self] = &[
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::Critical,
    ];

    fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }
}

impl FromStr for RiskLevel {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            "critical" => Ok(RiskLevel::Critical),
            _ => Err(UnknownVariant::new("risk level", s)),
        }
    }
}

/// Returned by the `FromStr` impls above when a label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        UnknownVariant {
            kind,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfrastructureKind {
    Electricity,
    Water,
    Sewerage,
    Internet,
    Gas,
}

impl Category for InfrastructureKind {
    const ALL: &'static [Self] = &[
        InfrastructureKind::Electricity,
        InfrastructureKind::Water,
        InfrastructureKind::Sewerage,
        InfrastructureKind::Internet,
        InfrastructureKind::Gas,
    ];

    fn label(self) -> &'static str {
        match self {
            InfrastructureKind::Electricity => "Electricity",
            InfrastructureKind::Water => "Water",
            InfrastructureKind::Sewerage => "Sewerage",
            InfrastructureKind::Internet => "Internet",
            InfrastructureKind::Gas => "Gas",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Infrastructure {
    pub electricity: bool,
    pub water: bool,
    pub sewerage: bool,
    pub internet: bool,
    pub gas: bool,
}

impl Infrastructure {
    pub fn has(&self, kind: InfrastructureKind) -> bool {
        match kind {
            InfrastructureKind::Electricity => self.electricity,
            InfrastructureKind::Water => self.water,
            InfrastructureKind::Sewerage => self.sewerage,
            InfrastructureKind::Internet => self.internet,
            InfrastructureKind::Gas => self.gas,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// A project as handed over by the data-loading side. Read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub client: String,
    pub status: ProjectStatus,
    pub budget: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    pub zone_type: ZoneType,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub infrastructure: Infrastructure,
}

pub fn default_currency() -> String {
    "PEN".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionStatistic {
    pub region: String,
    pub total_projects: usize,
    pub active_projects: usize,
    pub completed_projects: usize,
    pub total_investment: f64,
    /// `None` when the bucket holds no projects.
    pub average_project_value: Option<f64>,
    /// Mean position of the located projects in this region.
    pub centroid: Option<GeoPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionEntry<C> {
    pub category: C,
    pub count: usize,
    pub total_investment: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfrastructureCoverage {
    pub kind: &'static str,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyInvestment {
    pub year: i32,
    pub projects: usize,
    pub total_investment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioTotals {
    pub total_projects: usize,
    pub active_projects: usize,
    pub completed_projects: usize,
    pub total_investment: f64,
    pub average_project_value: Option<f64>,
    pub regions_with_projects: usize,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct RegionSummaryRow {
    #[serde(rename = "Region")]
    #[tabled(rename = "Region")]
    pub region: String,
    #[serde(rename = "TotalProjects")]
    #[tabled(rename = "TotalProjects")]
    pub total_projects: usize,
    #[serde(rename = "ActiveProjects")]
    #[tabled(rename = "ActiveProjects")]
    pub active_projects: usize,
    #[serde(rename = "CompletedProjects")]
    #[tabled(rename = "CompletedProjects")]
    pub completed_projects: usize,
    #[serde(rename = "TotalInvestment")]
    #[tabled(rename = "TotalInvestment")]
    pub total_investment: String,
    #[serde(rename = "AvgProjectValue")]
    #[tabled(rename = "AvgProjectValue")]
    pub average_project_value: String,
    #[serde(rename = "Centroid")]
    #[tabled(rename = "Centroid")]
    pub centroid: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct RegionRankingRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Region")]
    #[tabled(rename = "Region")]
    pub region: String,
    #[serde(rename = "ActiveProjects")]
    #[tabled(rename = "ActiveProjects")]
    pub active_projects: usize,
    #[serde(rename = "TotalProjects")]
    #[tabled(rename = "TotalProjects")]
    pub total_projects: usize,
    #[serde(rename = "TotalInvestment")]
    #[tabled(rename = "TotalInvestment")]
    pub total_investment: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct DistributionRow {
    #[serde(rename = "Category")]
    #[tabled(rename = "Category")]
    pub category: String,
    #[serde(rename = "Projects")]
    #[tabled(rename = "Projects")]
    pub count: usize,
    #[serde(rename = "Share")]
    #[tabled(rename = "Share")]
    pub percentage: String,
    #[serde(rename = "TotalInvestment")]
    #[tabled(rename = "TotalInvestment")]
    pub total_investment: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct InfrastructureRow {
    #[serde(rename = "Service")]
    #[tabled(rename = "Service")]
    pub service: String,
    #[serde(rename = "Projects")]
    #[tabled(rename = "Projects")]
    pub count: usize,
    #[serde(rename = "Coverage")]
    #[tabled(rename = "Coverage")]
    pub percentage: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct YearlyTrendRow {
    #[serde(rename = "Year")]
    #[tabled(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Projects")]
    #[tabled(rename = "Projects")]
    pub projects: usize,
    #[serde(rename = "TotalInvestment")]
    #[tabled(rename = "TotalInvestment")]
    pub total_investment: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryStats {
    pub total_projects: usize,
    pub active_projects: usize,
    pub completed_projects: usize,
    pub total_regions: usize,
    pub total_investment: f64,
    pub avg_project_value: Option<f64>,
    pub top_region: Option<String>,
}
