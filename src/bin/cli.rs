//! Fitlog CLI
//!
//! Command-line client for the Fitlog API:
//! - Log workouts, meals and weight
//! - Show dashboard stats, streak, recent activity
//! - Show weight trend and goal progress
//! - Generate a default config file

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fitlog-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Personal fitness tracker")]
#[command(long_about = "Fitlog tracks workouts, meals and body weight.\nThis client talks to a running fitlog API server.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8000", global = true)]
    pub api_url: String,

    /// Route prefix the server mounts the API under (empty for none)
    #[arg(long, default_value = "/api/v1", global = true)]
    pub prefix: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show server status
    Status,

    /// Dashboard totals for a day
    Stats {
        /// Day to summarize (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Current activity streak
    Streak,

    /// Recent workouts, meals and weigh-ins
    Recent {
        /// Number of entries (1-50)
        #[arg(short, long, default_value = "10")]
        limit: u32,
    },

    /// Weight trend over the last N days
    Trend {
        /// Window size in days (1-365)
        #[arg(short, long, default_value = "7")]
        days: u32,
    },

    /// Progress toward the weight goal
    Progress,

    /// Log a weight measurement
    LogWeight {
        /// Weight in lbs
        weight: f64,
        /// Date of the measurement (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Log a workout
    LogWorkout {
        /// Workout type (cardio, strength, flexibility, sports, other)
        kind: String,
        /// Workout name
        name: String,
        /// Duration in minutes
        minutes: i64,
        /// Calories burned
        #[arg(short, long, default_value = "0")]
        calories: i64,
    },

    /// Log a meal
    LogMeal {
        /// Meal type (breakfast, lunch, dinner, snack)
        kind: String,
        /// What was eaten
        description: String,
        /// Calories
        calories: i64,
        /// Protein in grams
        #[arg(short, long, default_value = "0")]
        protein: i64,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let api = ApiClient {
        client: &client,
        base: api_root(&cli.api_url, &cli.prefix),
    };
    let json_output = cli.format == "json";

    match cli.command {
        Commands::Status => {
            let response = client.get(api.url("/health")).send().await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: Value = resp.json().await?;

                    if json_output {
                        println!("{}", serde_json::to_string_pretty(&health)?);
                    } else {
                        println!("Fitlog CLI v{}", env!("CARGO_PKG_VERSION"));
                        println!();
                        println!("API Status: {}", health["status"].as_str().unwrap_or("unknown"));
                        println!("API Version: {}", health["version"].as_str().unwrap_or("unknown"));
                    }
                }
                Ok(resp) => {
                    eprintln!("API returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to Fitlog API at {}", api.base);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the Fitlog API server is running:");
                    eprintln!("  cargo run --bin fitlog");
                    std::process::exit(1);
                }
            }
        }

        Commands::Stats { date } => {
            let path = match date {
                Some(date) => format!("/dashboard/stats?target_date={}", date),
                None => "/dashboard/stats".to_string(),
            };
            let stats = api.get(&path).await?;

            if json_output {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Stats for {}", stats["date"].as_str().unwrap_or("-"));
                println!("{}", "-".repeat(32));
                println!("{:<20} {}", "Calories consumed", stats["calories_consumed"]);
                println!("{:<20} {}g", "Protein", stats["protein_consumed"]);
                println!("{:<20} {}", "Meals", stats["meal_count"]);
                println!("{:<20} {}", "Workouts", stats["workout_count"]);
                println!("{:<20} {}", "Calories burned", stats["calories_burned"]);
                println!("{:<20} {}", "Current weight", format_weight(&stats["current_weight"]));
            }
        }

        Commands::Streak => {
            let streak = api.get("/dashboard/streak").await?;

            if json_output {
                println!("{}", serde_json::to_string_pretty(&streak)?);
            } else {
                let days = streak["streak"].as_u64().unwrap_or(0);
                println!("{} day streak", days);
                if let Some(last) = streak["last_activity_date"].as_str() {
                    println!("Last activity: {}", last);
                }
            }
        }

        Commands::Recent { limit } => {
            let feed = api
                .get(&format!("/dashboard/recent-activity?limit={}", limit))
                .await?;

            if json_output {
                println!("{}", serde_json::to_string_pretty(&feed)?);
            } else {
                print_activity_table(&feed);
            }
        }

        Commands::Trend { days } => {
            let trend = api.get(&format!("/weight/trend?days={}", days)).await?;

            if json_output {
                println!("{}", serde_json::to_string_pretty(&trend)?);
            } else {
                print_trend_table(&trend);
            }
        }

        Commands::Progress => {
            let progress = api.get("/goals/progress").await?;

            if json_output {
                println!("{}", serde_json::to_string_pretty(&progress)?);
            } else {
                println!(
                    "{} -> {} lbs (now {})",
                    format_weight(&progress["start_weight"]),
                    format_weight(&progress["target_weight"]),
                    format_weight(&progress["current_weight"]),
                );
                println!("Lost so far: {} lbs", format_weight(&progress["lost_so_far"]));
                println!("Remaining:   {} lbs", format_weight(&progress["remaining"]));
                println!(
                    "Complete:    {:.1}%",
                    progress["percent_complete"].as_f64().unwrap_or(0.0)
                );
            }
        }

        Commands::LogWeight { weight, date } => {
            let created = api
                .post("/weight", json!({ "weight": weight, "date": date }))
                .await?;
            println!(
                "Logged weight {} lbs on {}",
                weight,
                created["date"].as_str().unwrap_or("-")
            );
        }

        Commands::LogWorkout {
            kind,
            name,
            minutes,
            calories,
        } => {
            let created = api
                .post(
                    "/workouts",
                    json!({
                        "type": kind,
                        "name": name,
                        "duration": minutes,
                        "calories_burned": calories,
                    }),
                )
                .await?;
            println!(
                "Logged workout '{}' ({} min) [{}]",
                name,
                minutes,
                created["id"].as_str().unwrap_or("-")
            );
        }

        Commands::LogMeal {
            kind,
            description,
            calories,
            protein,
        } => {
            let created = api
                .post(
                    "/meals",
                    json!({
                        "type": kind,
                        "description": description,
                        "calories": calories,
                        "protein": protein,
                    }),
                )
                .await?;
            println!(
                "Logged {} '{}' ({} cal) [{}]",
                kind,
                description,
                calories,
                created["id"].as_str().unwrap_or("-")
            );
        }

        Commands::Config { output } => {
            let config = fitlog::config::generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Server URL joined with the route prefix, without a trailing slash
fn api_root(api_url: &str, prefix: &str) -> String {
    let base = api_url.trim_end_matches('/');
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, prefix)
    }
}

/// Thin JSON client over the prefixed API routes
struct ApiClient<'a> {
    client: &'a reqwest::Client,
    base: String,
}

impl ApiClient<'_> {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn get(&self, path: &str) -> Result<Value, Box<dyn std::error::Error>> {
        let response = self.client.get(self.url(path)).send().await?;
        read_response(response).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, Box<dyn std::error::Error>> {
        let response = self.client.post(self.url(path)).json(&body).send().await?;
        read_response(response).await
    }
}

/// Decode a success body, or print the API error and exit
async fn read_response(response: reqwest::Response) -> Result<Value, Box<dyn std::error::Error>> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response.text().await.unwrap_or_default();
    match serde_json::from_str::<Value>(&text) {
        Ok(body) => {
            eprintln!(
                "Request failed ({}): {}",
                status,
                body["error"]["message"].as_str().unwrap_or(&text)
            );
            if let Some(fields) = body["error"]["fields"].as_array() {
                for field in fields {
                    eprintln!(
                        "  {}: {}",
                        field["field"].as_str().unwrap_or("-"),
                        field["message"].as_str().unwrap_or("-")
                    );
                }
            }
        }
        Err(_) => eprintln!("Request failed ({}): {}", status, text),
    }
    std::process::exit(1);
}

fn format_weight(value: &Value) -> String {
    value
        .as_f64()
        .map(|v| format!("{:.1}", v))
        .unwrap_or_else(|| "-".to_string())
}

fn print_activity_table(feed: &Value) {
    let activities = match feed["activities"].as_array() {
        Some(a) if !a.is_empty() => a,
        _ => {
            println!("No recent activity");
            return;
        }
    };

    println!("{:<20} {:<10} {:<24} {}", "Date", "Type", "Title", "Details");
    println!("{}", "-".repeat(80));

    for item in activities {
        let date = item["date"]
            .as_str()
            .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:<20} {:<10} {:<24} {}",
            date,
            item["type"].as_str().unwrap_or("-"),
            item["title"].as_str().unwrap_or("-"),
            item["details"].as_str().unwrap_or("-"),
        );
    }
}

fn print_trend_table(trend: &Value) {
    let points = match trend["trend"].as_array() {
        Some(p) if !p.is_empty() => p,
        _ => {
            println!("No weight entries in the selected range");
            return;
        }
    };

    println!("{:<12} | {}", "Date", "Weight");
    println!("{}", "-".repeat(24));
    for point in points {
        println!(
            "{:<12} | {}",
            point["date"].as_str().unwrap_or("-"),
            format_weight(&point["weight"])
        );
    }

    if let Some(change) = trend["change"].as_f64() {
        println!();
        println!("Change: {:+.2} lbs", change);
    }
}
