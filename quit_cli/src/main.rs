use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use quit_core::*;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "quitplan")]
#[command(about = "Quit-plan progress calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create, show or restart the quit plan
    Plan {
        #[command(subcommand)]
        action: PlanAction,
    },

    /// Show progress and the allowance for a day (default: today)
    Today {
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Print the day-by-day schedule
    Schedule {
        /// Write the schedule to a CSV file instead
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Log what was smoked on a day
    Log {
        #[arg(long)]
        smoked: u32,

        #[arg(long, default_value_t = 0)]
        cravings: u32,

        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show projected and logged savings
    Savings {
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show health milestones reached so far
    Milestones {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Subcommand)]
enum PlanAction {
    /// Create a new plan, replacing any existing one
    Create {
        /// immediate, linear, exponential or logarithmic
        #[arg(long)]
        reduction: ReductionType,

        /// Cigarettes per day before starting
        #[arg(long)]
        initial: u32,

        #[arg(long)]
        start: NaiveDate,

        #[arg(long)]
        goal: NaiveDate,

        /// Cigarettes per pack (default from config)
        #[arg(long)]
        per_pack: Option<u32>,

        /// Price of one pack
        #[arg(long)]
        price: Decimal,
    },

    /// Show the stored plan
    Show,

    /// Move the plan to start again on a date (default: today)
    Restart {
        #[arg(long)]
        on: Option<NaiveDate>,
    },
}

/// Files the CLI keeps under the data directory
struct DataPaths {
    plan: PathBuf,
    records: PathBuf,
}

impl DataPaths {
    fn new(data_dir: &Path) -> Self {
        Self {
            plan: data_dir.join("plan.json"),
            records: data_dir.join("records.jsonl"),
        }
    }
}

fn main() -> ExitCode {
    quit_core::logging::init_with_level("warn");

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let paths = DataPaths::new(&data_dir);

    match cli.command {
        Commands::Plan { action } => match action {
            PlanAction::Create {
                reduction,
                initial,
                start,
                goal,
                per_pack,
                price,
            } => cmd_plan_create(
                &paths,
                &config,
                reduction,
                initial,
                start,
                goal,
                per_pack,
                price,
            ),
            PlanAction::Show => cmd_plan_show(&paths, &config),
            PlanAction::Restart { on } => cmd_plan_restart(&paths, on.unwrap_or_else(today)),
        },
        Commands::Today { date } => cmd_today(&paths, date.unwrap_or_else(today)),
        Commands::Schedule { csv } => cmd_schedule(&paths, csv),
        Commands::Log {
            smoked,
            cravings,
            date,
        } => cmd_log(&paths, smoked, cravings, date.unwrap_or_else(today)),
        Commands::Savings { date } => cmd_savings(&paths, &config, date.unwrap_or_else(today)),
        Commands::Milestones { date } => cmd_milestones(&paths, date),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn load_plan(paths: &DataPaths) -> Result<StoredPlan> {
    JsonPlanStore::new(&paths.plan).load()?.ok_or(Error::NoPlan)
}

#[allow(clippy::too_many_arguments)]
fn cmd_plan_create(
    paths: &DataPaths,
    config: &Config,
    reduction: ReductionType,
    initial: u32,
    start: NaiveDate,
    goal: NaiveDate,
    per_pack: Option<u32>,
    price: Decimal,
) -> Result<()> {
    let plan = QuitPlanParameters::new(
        reduction,
        initial,
        start,
        goal,
        per_pack.unwrap_or(config.defaults.cigarettes_per_pack),
        price,
    )?;

    JsonPlanStore::new(&paths.plan).save(&StoredPlan::new(plan.clone()))?;
    tracing::info!("Created plan {}", plan.id);

    println!("✓ Plan created");
    display_plan(&plan, &config.defaults.currency);
    Ok(())
}

fn cmd_plan_show(paths: &DataPaths, config: &Config) -> Result<()> {
    let stored = load_plan(paths)?;
    display_plan(&stored.plan, &config.defaults.currency);

    if !stored.restarts.is_empty() {
        println!("  Restarts:");
        for restart in &stored.restarts {
            println!(
                "    {} (was {} → {})",
                restart.restarted_at, restart.previous_start_date, restart.previous_goal_date
            );
        }
    }
    Ok(())
}

fn cmd_plan_restart(paths: &DataPaths, on: NaiveDate) -> Result<()> {
    let store = JsonPlanStore::new(&paths.plan);
    let mut stored = store.load()?.ok_or(Error::NoPlan)?;
    stored.restart(on);
    store.save(&stored)?;

    println!(
        "✓ Plan restarted: {} → {}",
        stored.plan.start_date, stored.plan.goal_date
    );
    Ok(())
}

fn cmd_today(paths: &DataPaths, date: NaiveDate) -> Result<()> {
    let plan = load_plan(paths)?.plan;
    let records = load_records(&paths.records)?;
    let progress = plan_progress(&plan, date);

    println!("  Date: {}", progress.date);
    match progress.status {
        PlanStatus::NotStarted => {
            println!("  Plan starts on {}", plan.start_date);
        }
        PlanStatus::InProgress => {
            println!("  Day {} of {}", progress.day_index, progress.total_days);
        }
        PlanStatus::GoalReached => {
            println!("  Goal reached");
        }
    }
    println!("  Allowance: {} cigarettes", progress.allowance_today);
    println!("  Progress: {}%", progress.percent_complete);
    println!("  Days remaining: {}", progress.days_remaining);
    println!(
        "  Smoke-free streak: {} days",
        smoke_free_streak(&records, date)
    );

    if let Some(logged) = records.iter().find(|r| r.date == date) {
        let status = match compliance(&plan, std::slice::from_ref(logged)).first() {
            Some(day) if !day.within_allowance => "over allowance",
            Some(_) => "within allowance",
            None => "before plan start",
        };
        println!(
            "  Logged: {} cigarettes, {} cravings ({})",
            logged.cigarettes_smoked, logged.cravings, status
        );
    }
    Ok(())
}

fn cmd_schedule(paths: &DataPaths, csv: Option<PathBuf>) -> Result<()> {
    let plan = load_plan(paths)?.plan;
    let records = load_records(&paths.records)?;

    if let Some(path) = csv {
        let rows = write_schedule_csv(&plan, &records, &path)?;
        println!("✓ Wrote {} days to {}", rows, path.display());
        return Ok(());
    }

    println!("  {:>4}  {:<10}  {:>9}  {:>6}", "Day", "Date", "Allowance", "Smoked");
    let logged: std::collections::HashMap<_, _> = records
        .iter()
        .map(|r| (r.date, r.cigarettes_smoked))
        .collect();

    for day in schedule(&plan) {
        let smoked = logged
            .get(&day.date)
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "  {:>4}  {:<10}  {:>9}  {:>6}",
            day.day_index,
            day.date.to_string(),
            day.recommended_count,
            smoked
        );
    }
    Ok(())
}

fn cmd_log(paths: &DataPaths, smoked: u32, cravings: u32, date: NaiveDate) -> Result<()> {
    let plan = load_plan(paths)?.plan;
    let record = DailyRecord::new(date, smoked, cravings);

    let mut log = JsonlRecordLog::new(&paths.records);
    log.append(&record)?;

    let allowed = allowance_on(&plan, date);
    println!("✓ Logged {} cigarettes for {}", smoked, date);
    if smoked <= allowed {
        println!("  Within today's allowance of {}", allowed);
    } else {
        println!("  Over today's allowance of {} by {}", allowed, smoked - allowed);
    }
    Ok(())
}

fn cmd_savings(paths: &DataPaths, config: &Config, date: NaiveDate) -> Result<()> {
    let plan = load_plan(paths)?.plan;
    let records: Vec<DailyRecord> = load_records(&paths.records)?
        .into_iter()
        .filter(|r| r.date <= date)
        .collect();

    let currency = &config.defaults.currency;
    let projected = project_plan_savings(&plan, date);
    let logged = savings_from_records(&plan, &records);

    println!("  Projected (since {}):", plan.start_date);
    display_savings(&projected, currency);
    println!("  From logged days:");
    display_savings(&logged, currency);
    Ok(())
}

fn cmd_milestones(paths: &DataPaths, date: Option<NaiveDate>) -> Result<()> {
    let plan = load_plan(paths)?.plan;
    let records = load_records(&paths.records)?;

    let since = smoke_free_since(&plan, &records);
    let now = match date {
        Some(d) => d.and_time(chrono::NaiveTime::MIN),
        None => Local::now().naive_local(),
    };

    println!("  Smoke-free since {}", since);
    let since = since.and_time(chrono::NaiveTime::MIN);

    let reached = milestones_reached(since, now);
    if reached.is_empty() {
        println!("  No milestones reached yet");
    }
    for milestone in reached {
        println!("  ✓ {}: {}", milestone.title, milestone.description);
    }

    if let Some((next, remaining)) = next_milestone(since, now) {
        println!(
            "  Next: {} in {}",
            next.title,
            format_remaining(remaining)
        );
    }
    Ok(())
}

fn display_plan(plan: &QuitPlanParameters, currency: &str) {
    println!();
    println!("  Reduction: {}", plan.reduction_type);
    println!("  Baseline: {} cigarettes/day", plan.initial_smoking_amount);
    println!(
        "  Window: {} → {} ({} days)",
        plan.start_date,
        plan.goal_date,
        plan.total_days()
    );
    println!(
        "  Pack: {} cigarettes for {} {}",
        plan.cigarettes_per_pack,
        plan.price_per_pack.normalize(),
        currency
    );
    println!();
}

fn display_savings(savings: &SavingsResult, currency: &str) {
    println!("    Smoke-free days: {}", savings.days_smoke_free);
    println!(
        "    Money saved: {} {}",
        savings.money_saved.round_dp(2).normalize(),
        currency
    );
    println!("    Cigarettes avoided: {}", savings.cigarettes_avoided);
}

fn format_remaining(remaining: chrono::Duration) -> String {
    if remaining.num_days() >= 1 {
        format!("{} days", remaining.num_days())
    } else if remaining.num_hours() >= 1 {
        format!("{} hours", remaining.num_hours())
    } else {
        format!("{} minutes", remaining.num_minutes().max(1))
    }
}
