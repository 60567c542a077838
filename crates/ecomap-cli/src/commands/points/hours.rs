//! Operating-hours command implementation.
//!
//! Validates a weekly schedule the way the hours form does before a point
//! is submitted, and prints the resulting opening periods.

use anyhow::{Context, Result, anyhow, bail};
use clap::Args;

use ecomap_core::{HoursSlot, OperatingHours, TimeField, format_time};

use crate::output;

#[derive(Args, Debug)]
pub struct HoursArgs {
    /// Monday to Friday hours as OPEN-CLOSE (e.g., 0800-1800)
    #[arg(long, value_name = "OPEN-CLOSE")]
    pub weekdays: Option<String>,

    /// Hours for a single day as DAY=OPEN-CLOSE (e.g., sat=09:00-13:00), repeatable
    #[arg(long = "day", value_name = "DAY=OPEN-CLOSE")]
    pub days: Vec<String>,

    /// Print the periods as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: HoursArgs) -> Result<()> {
    let hours = schedule(&args)?;
    let periods = hours.periods().context("Invalid operating hours")?;

    if periods.is_empty() {
        output::nothing_found("open days");
        return Ok(());
    }

    if args.json {
        return output::json(&periods);
    }

    for period in &periods {
        println!(
            "{}  {}-{}",
            period.weekday,
            period.open.format("%H:%M"),
            period.close.format("%H:%M")
        );
    }
    Ok(())
}

fn schedule(args: &HoursArgs) -> Result<OperatingHours> {
    let mut hours = OperatingHours::new();

    if let Some(range) = &args.weekdays {
        select(&mut hours, HoursSlot::Weekdays, range)?;
    }

    for entry in &args.days {
        let (day, range) = entry
            .split_once('=')
            .ok_or_else(|| anyhow!("Expected DAY=OPEN-CLOSE, got '{entry}'"))?;
        let day = day
            .trim()
            .parse()
            .map_err(|_| anyhow!("Unknown day '{day}'"))?;
        let slot = HoursSlot::Day(day);
        if hours.get(slot).selected {
            bail!("Day '{day}' given more than once");
        }
        select(&mut hours, slot, range)?;
    }

    Ok(hours)
}

fn select(hours: &mut OperatingHours, slot: HoursSlot, range: &str) -> Result<()> {
    let (open, close) = range
        .split_once('-')
        .ok_or_else(|| anyhow!("Expected OPEN-CLOSE, got '{range}'"))?;

    hours.toggle(slot);
    hours.set_time(slot, TimeField::Open, &format_time(open));
    hours.set_time(slot, TimeField::Close, &format_time(close));
    Ok(())
}
