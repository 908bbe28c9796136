use anyhow::Result;
use mcastats::{aggregate, config::RunConfig, pipeline, report};
use std::env;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) load config ──────────────────────────────────────────────
    let cfg = match env::args().nth(1) {
        Some(path) => RunConfig::from_yaml_file(path)?,
        None => RunConfig::default(),
    };
    info!(registry = %cfg.registry.display(), out_dir = %cfg.out_dir.display(), "running aggregation pipelines");

    // ─── 3) run the four passes; none share state, so pair them up ───
    let ((yearly, capital), (top, districts)) = rayon::join(
        || {
            rayon::join(
                || pipeline::yearly_counts(&cfg),
                || pipeline::capital_histogram(&cfg),
            )
        },
        || {
            rayon::join(
                || pipeline::top_categories(&cfg),
                || pipeline::district_counts(&cfg),
            )
        },
    );
    let (yearly, capital, top, districts) = (yearly?, capital?, top?, districts?);

    // ─── 4) hand the finished aggregates to the chart side ───────────
    let year_pairs: Vec<(String, u64)> = yearly.into_iter().collect();
    report::write_label_counts(&cfg.out_dir, "company_registrations_by_year", &year_pairs)?;
    report::write_label_counts(
        &cfg.out_dir,
        "authorized_capital_histogram",
        &capital.labelled(),
    )?;
    report::write_top_categories(&cfg.out_dir, "grouped_bar_top_categories_per_year", &top)?;

    let district_stem = format!("company_registrations_{}_by_district", cfg.district_year);
    let top_ten = aggregate::top_districts(&districts, 10);
    report::write_label_counts(&cfg.out_dir, &district_stem, &top_ten)?;

    info!("all done");
    Ok(())
}
