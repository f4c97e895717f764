use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use kp_config::{KpConfig, TransitPolicy};
use kp_search::{
    ChartAnalysis, ChartInput, MeanMotionEphemeris, SearchRange, SearchReport, SearchRequest,
    SearchStatus, spawn_search,
};
use kp_time::{UtcTime, format_jd_local};
use kp_vedic_base::{
    ALL_GRAHAS, CuspContext, DashaLevel, DashaNode, DashaTree, GeoLocation, HORARY_MAX,
    SiderealPosition, horary_ascendant_deg,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "kp",
    version,
    about = "KP sub lords, Vimshottari dashas, ruling planets and event timing"
)]
struct Cli {
    /// TOML config file (defaults apply when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    json: bool,
    /// Debug logging to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

/// Subject chart: birth data, or a horary number cast at the query instant.
#[derive(Args)]
struct ChartArgs {
    /// UTC datetime (YYYY-MM-DDThh:mm:ssZ)
    #[arg(long)]
    date: String,
    /// Latitude in degrees (north positive)
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,
    /// Longitude in degrees (east positive)
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,
    /// Local UTC offset in hours, e.g. 5.5
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    tz: f64,
    /// KP horary number (1-2193); omit for a birth chart
    #[arg(long)]
    horary: Option<u32>,
}

/// Primary and secondary cusps the chart is judged against.
#[derive(Args)]
struct ContextArgs {
    /// Primary cusp (1-12)
    #[arg(long)]
    pc: u8,
    /// Secondary cusps, comma separated
    #[arg(long, value_delimiter = ',')]
    sc: Vec<u8>,
    /// Treat a house 6 query as a disease query
    #[arg(long)]
    disease: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign, star, sub, sub-sub and sookshma lords of a sidereal longitude
    Sublord {
        /// Sidereal ecliptic longitude in degrees
        lon: f64,
    },
    /// Ascendant degree and lords for a KP horary number
    Horary {
        /// Horary number (1-2193)
        number: u32,
    },
    /// Vimshottari dasha tree, or the running chain at one instant
    Dasha {
        #[command(flatten)]
        chart: ChartArgs,
        /// Print the running MD..PrD chain at this UTC datetime
        #[arg(long)]
        at: Option<String>,
        /// Deepest level to print (1 = Mahadasha .. 5 = Pranadasha)
        #[arg(long, default_value = "2")]
        depth: u8,
    },
    /// Planet and cusp lords, significators, classification and ruling planets
    Chart {
        #[command(flatten)]
        chart: ChartArgs,
        #[command(flatten)]
        context: ContextArgs,
    },
    /// Dasha, transit and cuspal-interlink search over a date range
    Search {
        #[command(flatten)]
        chart: ChartArgs,
        #[command(flatten)]
        context: ContextArgs,
        /// Range start, UTC datetime
        #[arg(long)]
        from: String,
        /// Range end, UTC datetime
        #[arg(long)]
        to: String,
        /// Transit policy override: all or any
        #[arg(long)]
        policy: Option<String>,
        /// Interlink step override in minutes
        #[arg(long)]
        step_minutes: Option<f64>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> KpConfig {
    let Some(path) = path else {
        tracing::debug!("no config file given; using defaults");
        return KpConfig::default();
    };
    KpConfig::load(path).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}");
        std::process::exit(1);
    })
}

fn parse_utc(s: &str) -> UtcTime {
    s.parse().unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    })
}

fn require_input(args: &ChartArgs) -> ChartInput {
    let jd = parse_utc(&args.date).to_jd();
    let location = GeoLocation::new(args.lat, args.lon).unwrap_or_else(|e| {
        eprintln!("Invalid location: {e}");
        std::process::exit(1);
    });
    match args.horary {
        None => ChartInput::birth(jd, location, args.tz),
        Some(n) => ChartInput::horary(n, jd, location, args.tz).unwrap_or_else(|e| {
            eprintln!("{e}");
            std::process::exit(1);
        }),
    }
}

fn require_context(args: &ContextArgs) -> CuspContext {
    CuspContext::new(args.pc, &args.sc)
        .map(|c| c.with_disease_query(args.disease))
        .unwrap_or_else(|e| {
            eprintln!("Invalid cusp context: {e}");
            std::process::exit(1);
        })
}

fn require_analysis(input: &ChartInput, context: CuspContext, config: &KpConfig) -> ChartAnalysis {
    ChartAnalysis::compute(&MeanMotionEphemeris, input, context, config).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    })
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("Failed to serialize output: {e}");
            std::process::exit(1);
        }
    }
}

fn local_time(jd: f64, tz: f64) -> String {
    format_jd_local(jd, tz).unwrap_or_else(|_| format!("JD {jd:.5}"))
}

/// `Taurus 20°00'00"`.
fn format_position(pos: &SiderealPosition) -> String {
    let deg = pos.degrees_in_rashi();
    let total_secs = (deg * 3600.0).round() as u64;
    format!(
        "{:<11} {:>2}°{:02}'{:02}\"",
        pos.rashi.name(),
        total_secs / 3600,
        (total_secs / 60) % 60,
        total_secs % 60
    )
}

fn format_lords(pos: &SiderealPosition) -> String {
    format!(
        "{:<16} {:<8} {:<8} {:<8} {:<8} {:<8}",
        pos.nakshatra.name(),
        pos.sign_lord.english_name(),
        pos.star_lord.english_name(),
        pos.sub_lord.english_name(),
        pos.sub_sub_lord.english_name(),
        pos.sookshma_lord.english_name(),
    )
}

fn print_lords_header(first: &str) {
    println!(
        "{:<8} {:>8} {:<23} {:<16} {:<8} {:<8} {:<8} {:<8} {:<8}",
        first, "Lon", "Position", "Nakshatra", "Sign", "Star", "Sub", "SubSub", "Sookshma"
    );
}

fn print_position_row(label: &str, pos: &SiderealPosition) {
    println!(
        "{:<8} {:>8.4} {:<23} {}",
        label,
        pos.longitude,
        format_position(pos),
        format_lords(pos)
    );
}

fn print_dasha_nodes(nodes: &[DashaNode], max_depth: usize, tz: f64) {
    for node in nodes {
        let depth = node.level.depth();
        println!(
            "{}{} {:<8} {} -> {} ({:.2} years)",
            "  ".repeat(depth),
            node.level.short_name(),
            node.lord.english_name(),
            local_time(node.start_jd, tz),
            local_time(node.end_jd, tz),
            node.duration_years(),
        );
        if depth + 1 < max_depth {
            print_dasha_nodes(&node.children, max_depth, tz);
        }
    }
}

fn print_dasha(tree: &DashaTree, depth: u8, tz: f64) {
    let b = &tree.balance;
    println!(
        "Balance at birth: {} {:.4} years ({:.2}% elapsed)\n",
        b.start_lord,
        b.balance_years(),
        b.elapsed_fraction * 100.0
    );
    print_dasha_nodes(&tree.roots, usize::from(depth.clamp(1, 5)), tz);
}

fn print_chart(a: &ChartAnalysis) {
    let tz = a.input.utc_offset_hours;
    println!(
        "Chart for {} ({}), ayanamsha {:.4} deg\n",
        local_time(a.input.jd_utc, tz),
        a.weekday.name(),
        a.chart.ayanamsha_deg
    );

    print_lords_header("Planet");
    for (g, pos) in a.chart.planets_iter() {
        print_position_row(g.english_name(), pos);
    }
    println!();
    print_lords_header("Cusp");
    for cusp in &a.chart.cusps {
        print_position_row(&cusp.house_number.to_string(), &cusp.position);
    }

    println!(
        "\nSignificators and classification (PC {}, SC {})",
        a.context.primary, a.context.secondary
    );
    println!(
        "{:<8} {:>5} {:<18} {:<18} {:<22} {:<9} Rule",
        "Planet", "House", "Star", "Sub", "Final", "Class"
    );
    for g in ALL_GRAHAS {
        let s = a.significators.get(g);
        let c = a.classified(g);
        println!(
            "{:<8} {:>5} {:<18} {:<18} {:<22} {:<9} {}",
            g.english_name(),
            a.chart.house_of(g),
            s.star_sigs.to_string(),
            s.sub_sigs.to_string(),
            format!("{}{}", s.final_sigs, if s.positional_status { " PS" } else { "" }),
            c.classification.name(),
            c.rule.description()
        );
    }

    println!("\nRuling planets");
    for rp in &a.ruling_planets.planets {
        println!(
            "  {:<8} {:<22} {}",
            rp.planet.english_name(),
            rp.tier.name(),
            rp.rationale
        );
    }

    if let Some(span) = a.dasha.active_chain(a.input.jd_utc) {
        println!(
            "\nRunning dasha: {} ({} -> {})",
            span.label(),
            local_time(span.start_jd, tz),
            local_time(span.end_jd, tz)
        );
    }
}

fn print_report(report: &SearchReport, tz: f64) {
    match report.status {
        SearchStatus::Completed => println!("Search completed"),
        SearchStatus::Cancelled { stage } => println!("Search cancelled during {stage}"),
    }
    println!(
        "{} favourable dasha spans, {} transit windows, {} hits\n",
        report.spans.len(),
        report.windows.len(),
        report.hits.len()
    );
    for w in &report.windows {
        println!(
            "Window {} -> {}  [{}]  {}",
            local_time(w.start_jd, tz),
            local_time(w.end_jd, tz),
            w.dasha.label(),
            w.detail
        );
    }
    if !report.windows.is_empty() {
        println!();
    }
    for hit in &report.hits {
        let lords: Vec<&str> = hit.dasha_lords.iter().map(|g| g.english_name()).collect();
        println!(
            "{}  {:<8} {}  [{}]",
            hit.local_time,
            hit.linking_planet.english_name(),
            hit.link_description,
            lords.join("-")
        );
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = load_config(cli.config.as_ref());

    match cli.command {
        Commands::Sublord { lon } => {
            if !lon.is_finite() {
                eprintln!("Longitude must be a finite number");
                std::process::exit(1);
            }
            let pos = SiderealPosition::from_longitude(lon);
            if cli.json {
                print_json(&pos);
            } else {
                print_lords_header("Point");
                print_position_row("Input", &pos);
            }
        }

        Commands::Horary { number } => {
            let asc = horary_ascendant_deg(number).unwrap_or_else(|e| {
                eprintln!("{e} (valid: 1-{HORARY_MAX})");
                std::process::exit(1);
            });
            let pos = SiderealPosition::from_longitude(asc);
            if cli.json {
                print_json(&pos);
            } else {
                println!("Horary {number}: ascendant {asc:.6} deg sidereal\n");
                print_lords_header("Point");
                print_position_row("Asc", &pos);
            }
        }

        Commands::Dasha { chart, at, depth } => {
            let input = require_input(&chart);
            let context = CuspContext::new(1, &[]).unwrap_or_else(|e| {
                eprintln!("{e}");
                std::process::exit(1);
            });
            let analysis = require_analysis(&input, context, &config);
            let tz = input.utc_offset_hours;

            if let Some(at) = at {
                let jd = parse_utc(&at).to_jd();
                let Some(span) = analysis.dasha.active_chain(jd) else {
                    eprintln!("{at} is outside the dasha window of this chart");
                    std::process::exit(1);
                };
                if cli.json {
                    print_json(&span);
                } else {
                    for (level, lord) in [
                        DashaLevel::Mahadasha,
                        DashaLevel::Antardasha,
                        DashaLevel::Pratyantardasha,
                        DashaLevel::Sookshmadasha,
                        DashaLevel::Pranadasha,
                    ]
                    .into_iter()
                    .zip(span.lords)
                    {
                        println!("{:<16} {}", level.name(), lord.english_name());
                    }
                    println!(
                        "Pranadasha runs {} -> {}",
                        local_time(span.start_jd, tz),
                        local_time(span.end_jd, tz)
                    );
                }
            } else if cli.json {
                print_json(&analysis.dasha);
            } else {
                print_dasha(&analysis.dasha, depth, tz);
            }
        }

        Commands::Chart { chart, context } => {
            let input = require_input(&chart);
            let analysis = require_analysis(&input, require_context(&context), &config);
            if cli.json {
                print_json(&analysis);
            } else {
                print_chart(&analysis);
            }
        }

        Commands::Search {
            chart,
            context,
            from,
            to,
            policy,
            step_minutes,
        } => {
            let mut config = config;
            if let Some(p) = policy {
                config.search.transit_policy = p.parse::<TransitPolicy>().unwrap_or_else(|e| {
                    eprintln!("{e}");
                    std::process::exit(1);
                });
            }
            if let Some(step) = step_minutes {
                config.search.interlink_step_minutes = step;
            }
            if let Err(e) = config.validate() {
                eprintln!("{e}");
                std::process::exit(1);
            }

            let input = require_input(&chart);
            let range = SearchRange::new(parse_utc(&from).to_jd(), parse_utc(&to).to_jd())
                .unwrap_or_else(|e| {
                    eprintln!("{e}");
                    std::process::exit(1);
                });
            let request = SearchRequest {
                input,
                context: require_context(&context),
                range,
            };

            tracing::info!(
                from = %from,
                to = %to,
                policy = %config.search.transit_policy,
                step_minutes = config.search.interlink_step_minutes,
                "starting search"
            );
            let handle = spawn_search(Arc::new(MeanMotionEphemeris), request, config)
                .unwrap_or_else(|e| {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                });
            if !cli.json {
                for p in handle.progress().iter() {
                    let eta = p.eta.map_or_else(String::new, |d| format!(", eta {}s", d.as_secs()));
                    eprintln!(
                        "{}: {}/{} ({:.0}%){}",
                        p.stage,
                        p.processed,
                        p.total,
                        p.fraction() * 100.0,
                        eta
                    );
                }
            }
            let report = handle.join().unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                std::process::exit(1);
            });

            if cli.json {
                print_json(&report);
            } else {
                print_report(&report, input.utc_offset_hours);
            }
        }
    }
}
