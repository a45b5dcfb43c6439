// Entry point and interactive menu.
//
// - Option [1] loads the word count CSV named in `writing_metrics.json`.
// - Option [2] derives every series, writes them out as CSV, writes the full
//   metrics set as JSON and prints markdown previews.
// - After generating reports, the user can go back to the menu or exit.
use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::{self, Write};
use tracing::{error, info, warn};
use writing_metrics::{
    all_non_cumulative_metrics, cumulative_words_written, logging, net_cumulative_words_written,
    net_words_written, output, progress_columns, util, weekday_words_written, words_written,
    Config, WeekdayReports, WordCountTable,
};

const SETTINGS_FILE: &str = "writing_metrics.json";
const PREVIEW_ROWS: usize = 5;

fn default_word_count_file() -> String {
    "word_counts.csv".to_string()
}

#[derive(Debug, Deserialize)]
struct Settings {
    #[serde(default = "default_word_count_file")]
    word_count_file: String,
    #[serde(flatten)]
    config: Config,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            word_count_file: default_word_count_file(),
            config: Config::default(),
        }
    }
}

fn load_settings() -> Result<Settings> {
    match std::fs::read_to_string(SETTINGS_FILE) {
        Ok(text) => serde_json::from_str(&text).with_context(|| format!("invalid {}", SETTINGS_FILE)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(file = SETTINGS_FILE, "settings file not found, using defaults");
            Ok(Settings::default())
        }
        Err(e) => Err(e).with_context(|| format!("could not read {}", SETTINGS_FILE)),
    }
}

/// Read a single line of input after printing the common "Enter choice:" prompt.
fn read_choice() -> String {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Returns `true` if the user chose `Y`, `false` if they chose `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        print!("Back to Report Selection (Y/N): ");
        let _ = io::stdout().flush();
        let mut buf = String::new();
        io::stdin().read_line(&mut buf).ok();
        match buf.trim().to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

fn handle_load(settings: &Settings) -> Option<WordCountTable> {
    match writing_metrics::loader::load_word_counts(&settings.word_count_file, &settings.config) {
        Ok((table, report)) => {
            println!(
                "Loaded {} days across {} columns ({} ignored).",
                util::format_int(report.total_rows),
                report.loaded_columns,
                report.ignored_columns
            );
            if report.duplicate_dates > 0 {
                println!(
                    "Note: {} rows repeat an earlier date.",
                    util::format_int(report.duplicate_dates)
                );
            }
            println!();
            Some(table)
        }
        Err(e) => {
            eprintln!("Failed to load {}: {}\n", settings.word_count_file, e);
            None
        }
    }
}

fn print_weekday_reports(title: &str, reports: &WeekdayReports) {
    println!("{}\n", title);
    for (day, report) in reports.iter() {
        println!("{}", day);
        match report {
            Some(r) => println!("{}\n", output::metrics_table(r)),
            None => println!("(no data)\n"),
        }
    }
}

fn generate_reports(table: &WordCountTable, config: &Config) -> Result<()> {
    let date_label = config.date_column()?;

    let written = words_written(table, config)?;
    let net = net_words_written(table, config, false)?;
    let cumulative = cumulative_words_written(table, config)?;
    let net_cumulative = net_cumulative_words_written(table, config, false)?;
    let by_weekday = weekday_words_written(&written, &config.project_columns, &config.date_format)?;

    let series = [
        ("words_written.csv", &written),
        ("net_words_written.csv", &net),
        ("cumulative_words_written.csv", &cumulative),
        ("net_cumulative_words_written.csv", &net_cumulative),
    ];
    for (file, s) in series {
        output::write_series_csv(file, s, date_label).with_context(|| format!("writing {}", file))?;
    }
    output::write_series_csv("weekday_words_written.csv", &by_weekday, "Weekday")?;

    println!("Words Written\n");
    println!("{}\n", output::series_table(&written, date_label, PREVIEW_ROWS));
    println!("Net Words Written\n");
    println!("{}\n", output::series_table(&net, date_label, PREVIEW_ROWS));
    println!("Cumulative Progress\n");
    let charted = progress_columns(cumulative.column_names(), config, true);
    let progress = cumulative.select(charted.as_slice())?;
    println!("{}\n", output::series_table(&progress, date_label, PREVIEW_ROWS));
    println!("Words Written by Weekday\n");
    println!("{}\n", output::series_table(&by_weekday, "Weekday", 7));

    let metrics = all_non_cumulative_metrics(table, config, None)?;
    output::write_json("metrics.json", &metrics)?;
    println!("Standard Metrics\n");
    println!("{}\n", output::metrics_table(&metrics.standard));
    println!("Net Metrics\n");
    println!("{}\n", output::metrics_table(&metrics.net));
    print_weekday_reports("Standard Metrics by Weekday", &metrics.standard_by_weekday);
    print_weekday_reports("Net Metrics by Weekday", &metrics.net_by_weekday);

    println!("(Series exported to CSV, metrics exported to metrics.json)\n");
    info!(rows = table.len(), "reports generated");
    Ok(())
}

fn main() -> Result<()> {
    logging::enable_logging()?;
    let settings = load_settings()?;
    let mut data: Option<WordCountTable> = None;

    loop {
        println!("Writing Metrics:");
        println!("[1] Load the word count file");
        println!("[2] Generate Reports\n");
        match read_choice().as_str() {
            "1" => {
                if let Some(table) = handle_load(&settings) {
                    data = Some(table);
                }
            }
            "2" => {
                println!();
                let Some(table) = &data else {
                    println!("Error: No data loaded. Please load the word count file first (option 1).\n");
                    continue;
                };
                if let Err(e) = generate_reports(table, &settings.config) {
                    error!(error = %e, "report generation failed");
                    eprintln!("Failed to generate reports: {:#}\n", e);
                }
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            _ => {
                println!("Invalid choice. Please enter 1 or 2.\n");
            }
        }
    }
    Ok(())
}
