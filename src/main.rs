// Entry point and high-level CLI flow.
//
// - Option [1] loads the project file, printing diagnostics.
// - Option [2] aggregates the loaded projects and writes every report plus
//   a JSON summary, previewing each on the console.
// - After generating reports, the user can go back to the selection menu
//   or exit. `--batch` runs [1] then [2] once without prompting.
use clap::{Parser, ValueEnum};
use once_cell::sync::Lazy;
use portfolio_report::config::{discover_config, load_config_from, ReportConfig};
use portfolio_report::distribution::{
    infrastructure_coverage, risk_distribution, status_distribution, yearly_investment,
    zone_distribution,
};
use portfolio_report::loader::source_for_path;
use portfolio_report::types::ProjectRecord;
use portfolio_report::{aggregate_by_region, output, reports, util, Error, RankingKey, Result};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

#[derive(Parser, Debug)]
#[command(name = "portfolio_report")]
#[command(about = "Regional investment reports for project portfolios", long_about = None)]
#[command(version)]
struct Cli {
    /// Project file to load (.csv or .json)
    #[arg(short, long, default_value = "projects.csv", env = "PORTFOLIO_INPUT")]
    input: PathBuf,

    /// Explicit config file (otherwise .portfolio-report.toml is searched upwards)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the generated report files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Number of regions kept in the ranking reports
    #[arg(long)]
    top: Option<usize>,

    /// Metric for the main top-N ranking
    #[arg(long, value_enum, default_value = "total-investment")]
    rank_by: RankBy,

    /// Load and generate once, without the interactive menu
    #[arg(long)]
    batch: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RankBy {
    /// Summed budgets per region
    TotalInvestment,
    /// Projects currently active
    ActiveProjects,
    /// All projects, whatever their status
    TotalProjects,
}

impl From<RankBy> for RankingKey {
    fn from(rank_by: RankBy) -> Self {
        match rank_by {
            RankBy::TotalInvestment => RankingKey::TotalInvestment,
            RankBy::ActiveProjects => RankingKey::ActiveProjects,
            RankBy::TotalProjects => RankingKey::TotalProjects,
        }
    }
}

// Loaded projects live here so the file is read once but reports can be
// generated repeatedly in a single run.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| Mutex::new(AppState { data: None }));

struct AppState {
    data: Option<Vec<ProjectRecord>>,
}

struct Settings {
    input: PathBuf,
    config: ReportConfig,
    rank_by: RankingKey,
}

fn resolve_settings(cli: Cli) -> Result<Settings> {
    let mut config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => {
            let cwd = std::env::current_dir()
                .map_err(|e| Error::io(".", e))?;
            discover_config(&cwd)?
        }
    };
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if let Some(n) = cli.top {
        config.top_n = n;
    }
    config.validate()?;
    Ok(Settings {
        input: cli.input,
        config,
        rank_by: cli.rank_by.into(),
    })
}

/// `None` once stdin is closed.
fn read_choice() -> Option<String> {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

/// Returns `true` if the user chose `Y`, `false` if they chose `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        print!("Back to Report Selection (Y/N): ");
        let _ = io::stdout().flush();
        let mut buf = String::new();
        if io::stdin().read_line(&mut buf).unwrap_or(0) == 0 {
            return false;
        }
        match buf.trim().to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

fn store_data(data: Vec<ProjectRecord>) {
    let mut state = APP_STATE.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    state.data = Some(data);
}

fn loaded_data() -> Option<Vec<ProjectRecord>> {
    let state = APP_STATE.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    state.data.clone()
}

/// Read the input file and print the load diagnostics.
fn load_projects(settings: &Settings) -> Result<Vec<ProjectRecord>> {
    let (data, load_report) = source_for_path(&settings.input)?.load()?;
    println!(
        "Processing dataset... ({} rows read, {} projects loaded)",
        util::format_int(load_report.total_rows),
        util::format_int(load_report.loaded_rows)
    );
    if load_report.parse_errors > 0 {
        println!(
            "Note: {} rows skipped due to parse/validation errors.",
            util::format_int(load_report.parse_errors)
        );
    }
    println!();
    Ok(data)
}

fn handle_load(settings: &Settings) {
    match load_projects(settings) {
        Ok(data) => store_data(data),
        Err(e) => {
            log::error!("load failed: {}", e);
            eprintln!("Failed to load file: {}\n", e);
        }
    }
}

fn save_and_preview<T>(
    settings: &Settings,
    file: &str,
    title: &str,
    rows: &[T],
    preview: usize,
) -> Result<()>
where
    T: serde::Serialize + tabled::Tabled + Clone,
{
    let path = settings.config.output_dir.join(file);
    println!("{}\n", title);
    output::preview_table_rows(rows, preview);
    output::write_csv(&path, rows)?;
    println!("(Full table exported to {})\n", path.display());
    Ok(())
}

/// Aggregate `data` and write every report plus the JSON summary. Stops at
/// the first file that cannot be written.
fn generate_reports(settings: &Settings, data: &[ProjectRecord]) -> Result<()> {
    let output_dir = &settings.config.output_dir;
    std::fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;

    let currency = settings.config.currency_symbol.as_str();
    let top_n = settings.config.top_n;
    println!("Generating reports...\n");

    let stats = aggregate_by_region(data, settings.config.regions.as_slice());

    let r1 = reports::region_summary(&stats, currency);
    save_and_preview(settings, "report1_region_summary.csv", "Report 1: Regional Investment Summary", &r1, 3)?;

    let r2 = reports::top_regions(&stats, settings.rank_by, top_n, currency);
    let title = match settings.rank_by {
        RankingKey::TotalInvestment => format!("Report 2: Top {} Regions by Investment", top_n),
        RankingKey::ActiveProjects => format!("Report 2: Top {} Most Active Regions", top_n),
        RankingKey::TotalProjects => format!("Report 2: Top {} Regions by Project Count", top_n),
    };
    save_and_preview(settings, "report2_region_ranking.csv", &title, &r2, top_n)?;

    let r3 = reports::distribution_rows(&zone_distribution(data), currency);
    save_and_preview(settings, "report3_zone_distribution.csv", "Report 3: Zone Type Distribution", &r3, r3.len())?;

    let r4 = reports::distribution_rows(&risk_distribution(data), currency);
    save_and_preview(settings, "report4_risk_distribution.csv", "Report 4: Risk Level Distribution", &r4, r4.len())?;

    let r5 = reports::distribution_rows(&status_distribution(data), currency);
    save_and_preview(settings, "report5_status_distribution.csv", "Report 5: Project Status Distribution", &r5, r5.len())?;

    let r6 = reports::infrastructure_rows(&infrastructure_coverage(data));
    save_and_preview(settings, "report6_infrastructure.csv", "Report 6: Basic Services Coverage", &r6, r6.len())?;

    let r7 = reports::yearly_trend_rows(&yearly_investment(data), currency);
    save_and_preview(settings, "report7_yearly_investment.csv", "Report 7: Investment by Start Year", &r7, 5)?;

    let summary = reports::generate_summary(&stats);
    let summary_path = output_dir.join("summary.json");
    output::write_json(&summary_path, &summary)?;
    println!("Summary Stats ({}):", summary_path.display());
    println!(
        "{{\"total_projects\": {}, \"total_investment\": {}, \"top_region\": {}}}\n",
        util::format_int(summary.total_projects),
        util::format_currency(summary.total_investment, currency),
        summary.top_region.as_deref().unwrap_or("—")
    );
    Ok(())
}

fn handle_generate_reports(settings: &Settings) {
    let Some(data) = loaded_data() else {
        println!("Error: No data loaded. Please load the project file first (option 1).\n");
        return;
    };
    if let Err(e) = generate_reports(settings, &data) {
        log::error!("report generation failed: {}", e);
        eprintln!("Report generation failed: {}\n", e);
    }
}

/// Load then generate once; any failure is returned to the caller.
fn run_batch(settings: &Settings) -> Result<()> {
    let data = load_projects(settings)?;
    generate_reports(settings, &data)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let batch = cli.batch;
    let settings = resolve_settings(cli)?;

    if batch {
        return run_batch(&settings);
    }

    loop {
        println!("Select Option:");
        println!("[1] Load the file");
        println!("[2] Generate Reports\n");
        let Some(choice) = read_choice() else {
            break;
        };
        match choice.as_str() {
            "1" => handle_load(&settings),
            "2" => {
                println!();
                handle_generate_reports(&settings);
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            _ => println!("Invalid choice. Please enter 1 or 2.\n"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const CSV: &str = "\
Id,Title,Client,Status,Budget,Currency,Address,Latitude,Longitude,ZoneType,RiskLevel,StartDate,Electricity,Water,Sewerage,Internet,Gas
P-1,Parque,Muni,active,100000,PEN,Lima,,,urban,low,2022-03-01,yes,yes,no,no,no
P-2,Canal,Junta,completed,75000,PEN,Arequipa,,,rural,high,,,,,,
";

    fn settings(input: PathBuf, output_dir: PathBuf) -> Settings {
        Settings {
            input,
            config: ReportConfig {
                output_dir,
                ..ReportConfig::default()
            },
            rank_by: RankingKey::default(),
        }
    }

    #[test]
    fn batch_run_fails_on_missing_input() {
        let dir = TempDir::new().unwrap();
        let settings = settings(dir.path().join("absent.csv"), dir.path().join("out"));
        assert!(run_batch(&settings).is_err());
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn batch_run_writes_every_report() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("projects.csv");
        fs::write(&input, CSV).unwrap();
        let out = dir.path().join("out");

        run_batch(&settings(input, out.clone())).unwrap();
        for file in [
            "report1_region_summary.csv",
            "report2_region_ranking.csv",
            "report3_zone_distribution.csv",
            "report4_risk_distribution.csv",
            "report5_status_distribution.csv",
            "report6_infrastructure.csv",
            "report7_yearly_investment.csv",
            "summary.json",
        ] {
            assert!(out.join(file).is_file(), "{} missing", file);
        }
    }

    #[test]
    fn batch_run_fails_when_output_dir_is_a_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("projects.csv");
        fs::write(&input, CSV).unwrap();
        let blocker = dir.path().join("out");
        fs::write(&blocker, "not a directory").unwrap();

        let err = run_batch(&settings(input, blocker)).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn failed_report_write_is_returned() {
        let dir = TempDir::new().unwrap();
        let settings = settings(dir.path().join("unused.csv"), dir.path().join("missing"));
        let rows = reports::infrastructure_rows(&infrastructure_coverage(&[]));
        assert!(save_and_preview(&settings, "infra.csv", "Infra", &rows, 1).is_err());
        assert!(!dir.path().join("missing").join("infra.csv").exists());
    }

    #[test]
    fn rank_by_flag_maps_to_ranking_key() {
        let cli = Cli::try_parse_from(["portfolio_report", "--rank-by", "active-projects"]).unwrap();
        assert_eq!(RankingKey::from(cli.rank_by), RankingKey::ActiveProjects);
        let cli = Cli::try_parse_from(["portfolio_report"]).unwrap();
        assert_eq!(RankingKey::from(cli.rank_by), RankingKey::TotalInvestment);
    }
}
