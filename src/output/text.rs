//! Human-readable text output

use crate::job::{JobReport, LookupReport, MeetingPointReport, RangeSumReport, Report};
use std::io::{self, Write};

/// Print the report to stdout
pub fn print_report(report: &Report) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, report)
}

/// Write the report lines for whichever job ran
pub fn write_report<W: Write>(out: &mut W, report: &Report) -> io::Result<()> {
    match &report.job {
        JobReport::RangeSum(r) => write_range_sum(out, r),
        JobReport::MeetingPoint(r) => write_meeting_point(out, r),
        JobReport::Lookup(r) => write_lookup(out, r),
    }
}

fn write_range_sum<W: Write>(out: &mut W, r: &RangeSumReport) -> io::Result<()> {
    writeln!(out, "The sum of the numbers from {} to {} is {}", r.min, r.max, r.sum)?;
    writeln!(out, "The average value is: {}", r.average)?;
    writeln!(out, "Calculated sum using formula is: {}", r.check_sum)
}

fn write_meeting_point<W: Write>(out: &mut W, r: &MeetingPointReport) -> io::Result<()> {
    writeln!(out, "Optimal meeting point: {}", r.location)?;
    writeln!(out, "Total distance (in km): {:.3}", r.total_km)?;
    writeln!(out, "Total travel time (velocity 60km/h): {:.3}", r.travel_hours)?;
    writeln!(out, "Total carbon emission in kg: {:.3}", r.carbon_kg)
}

fn write_lookup<W: Write>(out: &mut W, r: &LookupReport) -> io::Result<()> {
    for entry in &r.entries {
        writeln!(out, "{}: {}, {}", entry.name, entry.lat, entry.lon)?;
    }
    for name in &r.missing {
        writeln!(out, "{}: not found", name)?;
    }
    Ok(())
}
