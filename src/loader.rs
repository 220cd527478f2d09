//! Data-access side: reading project records from files.
//!
//! The aggregation code only ever sees `&[ProjectRecord]`; anything that can
//! produce such a slice can implement [`ProjectSource`].
use crate::error::{Error, Result};
use crate::types::{
    default_currency, GeoPoint, Infrastructure, ProjectRecord, ProjectStatus, RiskLevel, ZoneType,
};
use crate::util::{parse_date_safe, parse_f64_safe, parse_flag};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub parse_errors: usize,
}

pub trait ProjectSource {
    fn load(&self) -> Result<(Vec<ProjectRecord>, LoadReport)>;
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Id")]
    id: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Client")]
    client: Option<String>,
    #[serde(rename = "Status")]
    status: Option<String>,
    #[serde(rename = "Budget")]
    budget: Option<String>,
    #[serde(rename = "Currency")]
    currency: Option<String>,
    #[serde(rename = "Address")]
    address: Option<String>,
    #[serde(rename = "Latitude")]
    latitude: Option<String>,
    #[serde(rename = "Longitude")]
    longitude: Option<String>,
    #[serde(rename = "ZoneType")]
    zone_type: Option<String>,
    #[serde(rename = "RiskLevel")]
    risk_level: Option<String>,
    #[serde(rename = "StartDate")]
    start_date: Option<String>,
    #[serde(rename = "Electricity")]
    electricity: Option<String>,
    #[serde(rename = "Water")]
    water: Option<String>,
    #[serde(rename = "Sewerage")]
    sewerage: Option<String>,
    #[serde(rename = "Internet")]
    internet: Option<String>,
    #[serde(rename = "Gas")]
    gas: Option<String>,
}

impl RawRow {
    /// Turn a loose row into a record, or `None` if a required field is
    /// missing or unrecognised.
    fn into_record(self, line: usize) -> Option<ProjectRecord> {
        let status = match self.status.as_deref().map(str::parse::<ProjectStatus>) {
            Some(Ok(s)) => s,
            Some(Err(e)) => {
                log::debug!("row {}: {}", line, e);
                return None;
            }
            None => return None,
        };
        let zone_type: ZoneType = self.zone_type.as_deref()?.parse().ok()?;
        let risk_level: RiskLevel = self.risk_level.as_deref()?.parse().ok()?;
        let budget = match parse_f64_safe(self.budget.as_deref()) {
            Some(v) if v >= 0.0 => v,
            _ => {
                log::debug!("row {}: missing or negative budget", line);
                return None;
            }
        };

        // Coordinates count only as a pair.
        let location = match (
            parse_f64_safe(self.latitude.as_deref()),
            parse_f64_safe(self.longitude.as_deref()),
        ) {
            (Some(lat), Some(lon)) => Some(GeoPoint { lat, lon }),
            _ => None,
        };

        let trimmed = |v: Option<String>| v.map(|s| s.trim().to_string()).unwrap_or_default();
        let id = match trimmed(self.id) {
            id if id.is_empty() => format!("row-{}", line),
            id => id,
        };
        let currency = match trimmed(self.currency) {
            c if c.is_empty() => default_currency(),
            c => c,
        };

        Some(ProjectRecord {
            id,
            title: trimmed(self.title),
            client: trimmed(self.client),
            status,
            budget,
            currency,
            address: trimmed(self.address),
            location,
            zone_type,
            risk_level,
            start_date: parse_date_safe(self.start_date.as_deref()),
            infrastructure: Infrastructure {
                electricity: parse_flag(self.electricity.as_deref()),
                water: parse_flag(self.water.as_deref()),
                sewerage: parse_flag(self.sewerage.as_deref()),
                internet: parse_flag(self.internet.as_deref()),
                gas: parse_flag(self.gas.as_deref()),
            },
        })
    }
}

/// Projects exported as a CSV sheet with a header row.
#[derive(Debug, Clone)]
pub struct CsvProjectSource {
    path: PathBuf,
}

impl CsvProjectSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvProjectSource { path: path.into() }
    }
}

impl ProjectSource for CsvProjectSource {
    fn load(&self) -> Result<(Vec<ProjectRecord>, LoadReport)> {
        let mut rdr = ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_path(&self.path)?;
        let mut report = LoadReport::default();
        let mut projects = Vec::new();

        for (idx, result) in rdr.deserialize::<RawRow>().enumerate() {
            report.total_rows += 1;
            // +2: one for the header, one for 1-based numbering.
            let line = idx + 2;
            let row = match result {
                Ok(r) => r,
                Err(e) => {
                    log::debug!("row {}: {}", line, e);
                    report.parse_errors += 1;
                    continue;
                }
            };
            match row.into_record(line) {
                Some(project) => projects.push(project),
                None => report.parse_errors += 1,
            }
        }

        report.loaded_rows = projects.len();
        log::info!(
            "loaded {} of {} rows from {}",
            report.loaded_rows,
            report.total_rows,
            self.path.display()
        );
        Ok((projects, report))
    }
}

/// Projects stored as a JSON array of records.
#[derive(Debug, Clone)]
pub struct JsonProjectSource {
    path: PathBuf,
}

impl JsonProjectSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonProjectSource { path: path.into() }
    }
}

impl ProjectSource for JsonProjectSource {
    fn load(&self) -> Result<(Vec<ProjectRecord>, LoadReport)> {
        let contents =
            std::fs::read_to_string(&self.path).map_err(|e| Error::io(&self.path, e))?;
        let values: Vec<serde_json::Value> = serde_json::from_str(&contents)?;
        let mut report = LoadReport {
            total_rows: values.len(),
            ..LoadReport::default()
        };
        let mut projects = Vec::with_capacity(values.len());
        for (idx, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<ProjectRecord>(value) {
                Ok(p) if p.budget >= 0.0 && p.budget.is_finite() => projects.push(p),
                Ok(p) => {
                    log::debug!("record {}: invalid budget {}", idx, p.budget);
                    report.parse_errors += 1;
                }
                Err(e) => {
                    log::debug!("record {}: {}", idx, e);
                    report.parse_errors += 1;
                }
            }
        }
        report.loaded_rows = projects.len();
        log::info!(
            "loaded {} of {} records from {}",
            report.loaded_rows,
            report.total_rows,
            self.path.display()
        );
        Ok((projects, report))
    }
}

/// Pick a source by file extension: `.json` is read as JSON, `.csv` (or no
/// extension) as CSV.
pub fn source_for_path(path: &Path) -> Result<Box<dyn ProjectSource>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("json") => Ok(Box::new(JsonProjectSource::new(path))),
        Some("csv") | None => Ok(Box::new(CsvProjectSource::new(path))),
        Some(other) => Err(Error::UnsupportedSource(format!(
            "{} (unknown extension '.{}')",
            path.display(),
            other
        ))),
    }
}
