//! Report commands
//!
//! Each command reads what it needs from the [`Dataset`] and writes a plain
//! text table to `out`.

use crate::format::{format_number, hours, rule, truncate, wave_timeline};
use anyhow::{anyhow, Result};
use haai_catalog::{Activity, ArtifactStore, Capability, Dataset, ScoreSource};
use std::io::Write;

const NAME_WIDTH: usize = 40;

/// `domains`
pub(crate) fn domains<S: ArtifactStore + 'static>(
    dataset: &Dataset<S>,
    out: &mut impl Write,
) -> Result<()> {
    let taxonomy = dataset.taxonomy()?;

    writeln!(out, "HAAI Domains (ordered by abstraction level)")?;
    writeln!(out, "{}", rule('-', 70))?;
    writeln!(out, "{:<4} {:<35} {:<6} {:<8}", "ID", "Domain", "Abstr", "AGI Wave")?;
    writeln!(out, "{}", rule('-', 70))?;
    for d in &taxonomy.domains {
        writeln!(
            out,
            "{:<4} {:<35} {:<6} {:<8}",
            d.id,
            d.name,
            d.abstraction_score,
            d.wave_label()
        )?;
    }
    Ok(())
}

/// `domain <id>`
pub(crate) fn domain<S: ArtifactStore + 'static>(
    dataset: &Dataset<S>,
    id: u32,
    out: &mut impl Write,
) -> Result<()> {
    let taxonomy = dataset.taxonomy()?;
    let domain = taxonomy
        .domain(id)
        .ok_or_else(|| anyhow!("Domain {id} not found"))?;

    writeln!(out, "Domain {}: {}", domain.id, domain.name)?;
    writeln!(out, "{}", rule('-', 60))?;
    writeln!(out, "Description:     {}", domain.description)?;
    writeln!(out, "Abstraction:     {}/10", domain.abstraction_score)?;
    writeln!(out, "AGI Wave:        {}", domain.wave_label())?;
    writeln!(out, "Primary AI:      {}", domain.primary_ai_system_type)?;
    writeln!(out)?;
    writeln!(out, "Categories:")?;
    for c in &domain.categories {
        writeln!(out, "  {}: {}", c.id, c.name)?;
        writeln!(out, "      {}", c.description)?;
    }
    Ok(())
}

fn capability_wave_row(out: &mut impl Write, a: &Activity) -> std::io::Result<()> {
    writeln!(
        out,
        "{:<8} {:<40} {:<12} {:<5}",
        a.id,
        truncate(&a.name, NAME_WIDTH),
        a.scores.capability_str(),
        a.scores.agi_wave
    )
}

fn capability_wave_header(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{}", rule('-', 80))?;
    writeln!(out, "{:<8} {:<40} {:<12} {:<5}", "ID", "Name", "Capability", "Wave")?;
    writeln!(out, "{}", rule('-', 80))
}

/// `activities [domain]`; no filter (or 0) lists everything
pub(crate) fn activities<S: ArtifactStore + 'static>(
    dataset: &Dataset<S>,
    domain: Option<u32>,
    out: &mut impl Write,
) -> Result<()> {
    let catalog = dataset.catalog()?;
    let rows: Vec<&Activity> = match domain.filter(|d| *d > 0) {
        Some(d) => {
            writeln!(out, "Activities in Domain {d}")?;
            catalog.in_domain(d).collect()
        }
        None => {
            writeln!(out, "All Activities")?;
            catalog.activities().iter().collect()
        }
    };

    capability_wave_header(out)?;
    for a in rows {
        capability_wave_row(out, a)?;
    }
    Ok(())
}

/// `activity <id>`
pub(crate) fn activity<S: ArtifactStore + 'static>(
    dataset: &Dataset<S>,
    id: &str,
    out: &mut impl Write,
) -> Result<()> {
    let catalog = dataset.catalog()?;
    let a = catalog
        .get(id)
        .ok_or_else(|| anyhow!("Activity {id} not found"))?;
    let s = &a.scores;

    writeln!(out, "Activity {}: {}", a.id, a.name)?;
    writeln!(out, "{}", rule('-', 60))?;
    writeln!(out, "Description:  {}", a.description)?;
    writeln!(out, "Domain:       {}", a.domain())?;
    writeln!(out, "Category:     {}", a.category_id)?;
    writeln!(out)?;
    writeln!(out, "Scores:")?;
    writeln!(out, "  Abstraction:       {}", s.abstraction)?;
    writeln!(out, "  Error Tolerance:   {}", s.error_tolerance)?;
    writeln!(out, "  Feedback Speed:    {}", s.feedback_speed)?;
    writeln!(out, "  Social Complexity: {}", s.social_complexity)?;
    writeln!(out, "  Purpose:           {} ({})", s.purpose, s.purpose_name())?;
    writeln!(out, "  AI Capability:     {}", s.capability_str())?;
    writeln!(out, "  Bottleneck:        {}", s.bottleneck)?;
    writeln!(out, "  AGI Wave:          {}", s.agi_wave)?;
    writeln!(out)?;
    if !a.example_tasks.is_empty() {
        writeln!(out, "Example Tasks:")?;
        for task in &a.example_tasks {
            writeln!(out, "  - {task}")?;
        }
    }
    Ok(())
}

/// `wave <n>`
pub(crate) fn wave<S: ArtifactStore + 'static>(
    dataset: &Dataset<S>,
    wave: u8,
    out: &mut impl Write,
) -> Result<()> {
    let catalog = dataset.catalog()?;

    writeln!(out, "AGI Wave {wave} Activities ({})", wave_timeline(wave))?;
    writeln!(out, "{}", rule('-', 80))?;
    writeln!(out, "{:<8} {:<40} {:<12} {:<10}", "ID", "Name", "Capability", "Bottleneck")?;
    writeln!(out, "{}", rule('-', 80))?;

    let mut count = 0;
    for a in catalog.in_wave(wave) {
        writeln!(
            out,
            "{:<8} {:<40} {:<12} {:<10}",
            a.id,
            truncate(&a.name, NAME_WIDTH),
            a.scores.capability_str(),
            a.scores.bottleneck
        )?;
        count += 1;
    }
    writeln!(out, "\nTotal: {count} activities")?;
    Ok(())
}

/// `capability <status>`
pub(crate) fn capability<S: ArtifactStore + 'static>(
    dataset: &Dataset<S>,
    status: &str,
    out: &mut impl Write,
) -> Result<()> {
    let catalog = dataset.catalog()?;

    writeln!(out, "Activities with AI Capability: {status}")?;
    writeln!(out, "{}", rule('-', 80))?;
    writeln!(out, "{:<8} {:<40} {:<10} {:<5}", "ID", "Name", "Bottleneck", "Wave")?;
    writeln!(out, "{}", rule('-', 80))?;

    let mut count = 0;
    for a in catalog.with_capability(status) {
        writeln!(
            out,
            "{:<8} {:<40} {:<10} {:<5}",
            a.id,
            truncate(&a.name, NAME_WIDTH),
            a.scores.bottleneck,
            a.scores.agi_wave
        )?;
        count += 1;
    }
    writeln!(out, "\nTotal: {count} activities")?;
    Ok(())
}

/// `bottleneck <type>`
pub(crate) fn bottleneck<S: ArtifactStore + 'static>(
    dataset: &Dataset<S>,
    kind: &str,
    out: &mut impl Write,
) -> Result<()> {
    let catalog = dataset.catalog()?;

    writeln!(out, "Activities with Bottleneck: {kind}")?;
    capability_wave_header(out)?;
    let mut count = 0;
    for a in catalog.with_bottleneck(kind) {
        capability_wave_row(out, a)?;
        count += 1;
    }
    writeln!(out, "\nTotal: {count} activities")?;
    Ok(())
}

/// `search <term>`
pub(crate) fn search<S: ArtifactStore + 'static>(
    dataset: &Dataset<S>,
    term: &str,
    out: &mut impl Write,
) -> Result<()> {
    let catalog = dataset.catalog()?;
    let hits = catalog.search(term);

    writeln!(out, "Search results for: {}", term.to_lowercase())?;
    capability_wave_header(out)?;
    for a in &hits {
        capability_wave_row(out, a)?;
    }
    writeln!(out, "\nTotal: {} activities", hits.len())?;
    Ok(())
}

/// `time`
pub(crate) fn time<S: ArtifactStore + 'static>(
    dataset: &Dataset<S>,
    out: &mut impl Write,
) -> Result<()> {
    let atus = dataset.mappings()?.atus_mapping;

    writeln!(out, "ATUS Time-Spent Data (Average Minutes Per Day)")?;
    writeln!(out, "Source: {}", atus.data_source)?;
    writeln!(out, "{}", rule('-', 75))?;
    writeln!(out, "{:<4} {:<40} {:<8} {:<8}", "Code", "Category", "Min/Day", "Partic%")?;
    writeln!(out, "{}", rule('-', 75))?;
    for e in &atus.mappings {
        let participation = format!("{:.0}%", e.participation_rate * 100.0);
        writeln!(
            out,
            "{:<4} {:<40} {:<8} {:<8}",
            e.atus_code,
            truncate(&e.atus_category, NAME_WIDTH),
            e.avg_minutes_per_day,
            participation
        )?;
    }
    writeln!(out, "{}", rule('-', 75))?;

    let s = atus.summary;
    writeln!(out, "\nDaily Time Summary:")?;
    for (label, minutes) in [
        ("Sleep & Personal Care:", s.sleep_and_personal_care),
        ("Work:", s.work),
        ("Leisure:", s.leisure),
        ("Household & Care:", s.household_and_care),
        ("Travel:", s.travel),
        ("Other:", s.other),
    ] {
        writeln!(out, "  {label:<22} {minutes} min ({} hrs)", hours(minutes))?;
    }
    writeln!(out, "  {:<22} {} min (24 hrs)", "Total:", s.total_minutes_per_day)?;
    Ok(())
}

/// `econ`
#[allow(clippy::cast_precision_loss)]
pub(crate) fn econ<S: ArtifactStore + 'static>(
    dataset: &Dataset<S>,
    out: &mut impl Write,
) -> Result<()> {
    let econ = dataset.mappings()?.economic_impact;

    writeln!(out, "Economic Impact by HAAI Domain ({} {})", econ.currency, econ.year)?;
    writeln!(out, "{}", rule('-', 90))?;
    writeln!(
        out,
        "{:<4} {:<28} {:>12} {:>8} {:>12} {:<12}",
        "ID", "Domain", "Workers", "% Work", "Value ($B)", "Automation"
    )?;
    writeln!(out, "{}", rule('-', 90))?;
    for d in &econ.domain_economics {
        writeln!(
            out,
            "{:<4} {:<28} {:>12} {:>7.1}% {:>12} {:<12}",
            d.domain_id,
            truncate(&d.domain_name, 28),
            format_number(d.estimated_workers),
            d.percent_of_workforce,
            d.annual_value_billions,
            d.automation_exposure
        )?;
    }
    writeln!(out, "{}", rule('-', 90))?;

    let market = econ.us_labor_market;
    writeln!(out, "\nUS Labor Market Summary:")?;
    writeln!(out, "  Total Employment:     {} workers", format_number(market.total_employment))?;
    writeln!(out, "  Total Wages:          ${:.1} trillion", market.total_wages as f64 / 1e12)?;
    writeln!(out, "  Average Hourly Wage:  ${:.2}", market.average_hourly_wage)?;
    Ok(())
}

/// `stats`
pub(crate) fn stats<S: ArtifactStore + 'static>(
    dataset: &Dataset<S>,
    out: &mut impl Write,
) -> Result<()> {
    let catalog = dataset.catalog()?;
    let stats = catalog.stats();

    writeln!(out, "HAAI Taxonomy Statistics")?;
    writeln!(out, "{}", rule('=', 50))?;
    writeln!(out, "Total Activities: {}", stats.total)?;
    writeln!(out, "Generation:       {}\n", catalog.generation())?;

    writeln!(out, "By AI Capability:")?;
    for status in &Capability::KNOWN {
        let count = stats.capability_count(status);
        writeln!(out, "  {:<15} {count:>4} ({:>5.1}%)", status.as_str(), stats.percent(count))?;
    }

    writeln!(out, "\nBy AGI Wave:")?;
    for wave in 1..=4 {
        let count = stats.wave_count(wave);
        writeln!(out, "  Wave {wave}:         {count:>4} ({:>5.1}%)", stats.percent(count))?;
    }

    writeln!(out, "\nBy Bottleneck:")?;
    for (name, count) in &stats.by_bottleneck {
        writeln!(out, "  {name:<12} {count:>4} ({:>5.1}%)", stats.percent(*count))?;
    }

    writeln!(out, "\nBy Domain:")?;
    for (domain, count) in stats.domain_counts() {
        writeln!(out, "  Domain {domain:>2}:     {count:>4} activities")?;
    }
    Ok(())
}

/// `index <name>`
pub(crate) fn index<S: ArtifactStore + 'static>(
    dataset: &Dataset<S>,
    name: &str,
    out: &mut impl Write,
) -> Result<()> {
    let index = dataset
        .index(name)
        .ok_or_else(|| anyhow!("Index {name} not found"))?;

    writeln!(out, "Index: {}", index.name)?;
    writeln!(out, "{}", rule('-', 60))?;
    if !index.description.is_empty() {
        writeln!(out, "Description:  {}", index.description)?;
    }
    writeln!(out, "Scale:        {}-{}", index.scale.min, index.scale.max)?;
    writeln!(out, "Coverage:     {} activities", index.coverage())?;
    writeln!(out)?;
    writeln!(out, "Levels:")?;
    for level in &index.scale.levels {
        writeln!(out, "  {}  {}", level.level, level.name)?;
        writeln!(out, "      {}", level.definition)?;
    }
    Ok(())
}

/// `audit`
pub(crate) fn audit<S: ArtifactStore + 'static>(
    dataset: &Dataset<S>,
    out: &mut impl Write,
) -> Result<()> {
    let catalog = dataset.catalog()?;

    writeln!(out, "Score Resolution Audit")?;
    writeln!(out, "{}", rule('=', 60))?;
    writeln!(out, "Generation: {}", catalog.generation())?;
    writeln!(out, "Activities: {}", catalog.len())?;

    let Some(report) = catalog.merge_report() else {
        writeln!(out, "\nLegacy catalog: scores come straight from per-domain files.")?;
        return Ok(());
    };

    for source in ScoreSource::ALL {
        let missing = report.missing(source);
        let status = if report.unavailable.contains(&source) {
            "not loaded"
        } else {
            "loaded"
        };
        writeln!(out, "\n{source} ({status}) -> {}", source.fields())?;
        writeln!(out, "  Unresolved: {}", missing.len())?;
        for id in missing {
            writeln!(out, "    {id}")?;
        }
    }

    if report.is_complete() {
        writeln!(out, "\nEvery score was resolved.")?;
    }
    Ok(())
}
