//! Rendering of command results as tables, JSON or CSV.

use std::io::Write;

use clap::ValueEnum;
use pricer_risk::payoff::PnlProfile;
use pricer_risk::portfolio::{LegStatus, PortfolioValuation};
use pricer_risk::scenarios::ScenarioGrid;
use serde::Serialize;

use crate::error::Result;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Aligned text table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// Comma-separated values
    Csv,
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.6}", v))
}

/// Writes a portfolio valuation.
pub fn write_valuation<W: Write>(out: &mut W, valuation: &PortfolioValuation, format: Format) -> Result<()> {
    match format {
        Format::Json => write_json(out, valuation),
        Format::Csv => {
            let mut csv = csv::Writer::from_writer(out);
            csv.write_record([
                "leg_id",
                "instrument_type",
                "method",
                "quantity",
                "status",
                "price_per_unit",
                "price_total",
                "delta",
                "gamma",
                "vega",
                "theta",
                "rho",
                "error",
            ])?;
            for leg in &valuation.legs {
                let g = leg.greeks;
                csv.write_record([
                    leg.leg_id.clone(),
                    leg.instrument_type.clone(),
                    leg.method.clone(),
                    leg.quantity.to_string(),
                    status_str(leg.status).to_string(),
                    leg.price_per_unit.map(|v| v.to_string()).unwrap_or_default(),
                    leg.price_total.map(|v| v.to_string()).unwrap_or_default(),
                    g.map(|g| g.delta.to_string()).unwrap_or_default(),
                    g.map(|g| g.gamma.to_string()).unwrap_or_default(),
                    g.map(|g| g.vega.to_string()).unwrap_or_default(),
                    g.map(|g| g.theta.to_string()).unwrap_or_default(),
                    g.map(|g| g.rho.to_string()).unwrap_or_default(),
                    leg.error.clone().unwrap_or_default(),
                ])?;
            }
            csv.flush()?;
            Ok(())
        }
        Format::Table => {
            writeln!(
                out,
                "{:<12} {:<10} {:<22} {:>9} {:<6} {:>14} {:>14} {:>12}",
                "leg_id", "type", "method", "qty", "status", "price/unit", "price_total", "delta"
            )?;
            for leg in &valuation.legs {
                writeln!(
                    out,
                    "{:<12} {:<10} {:<22} {:>9} {:<6} {:>14} {:>14} {:>12}",
                    leg.leg_id,
                    leg.instrument_type,
                    leg.method,
                    leg.quantity,
                    status_str(leg.status),
                    opt(leg.price_per_unit),
                    opt(leg.price_total),
                    opt(leg.greeks.map(|g| g.delta)),
                )?;
                if let Some(error) = &leg.error {
                    writeln!(out, "    error: {}", error)?;
                }
            }
            let g = valuation.total_greeks;
            writeln!(out)?;
            writeln!(out, "total price  {:.6}", valuation.total_price)?;
            writeln!(
                out,
                "total greeks delta {:.6}  gamma {:.6}  vega {:.6}  theta {:.6}  rho {:.6}",
                g.delta, g.gamma, g.vega, g.theta, g.rho
            )?;
            writeln!(
                out,
                "legs         {} ok, {} error",
                valuation.summary.ok, valuation.summary.error
            )?;
            Ok(())
        }
    }
}

fn status_str(status: LegStatus) -> &'static str {
    match status {
        LegStatus::Ok => "ok",
        LegStatus::Error => "error",
    }
}

/// Writes a scenario grid; rows are vol shifts, columns spot shifts.
pub fn write_grid<W: Write>(out: &mut W, grid: &ScenarioGrid, format: Format) -> Result<()> {
    match format {
        Format::Json => write_json(out, grid),
        Format::Csv => {
            let mut csv = csv::Writer::from_writer(out);
            csv.write_record(["vol_shift", "spot_shift_pct", "total", "pnl"])?;
            for (row, &dv) in grid.totals.iter().zip(&grid.vol_shifts) {
                for (&total, &ds) in row.iter().zip(&grid.spot_shifts_pct) {
                    csv.write_record([
                        dv.to_string(),
                        ds.to_string(),
                        total.to_string(),
                        (total - grid.base_total).to_string(),
                    ])?;
                }
            }
            csv.flush()?;
            Ok(())
        }
        Format::Table => {
            writeln!(
                out,
                "base total {:.6}  (rate shift {} bps)",
                grid.base_total, grid.rate_shift_bps
            )?;
            write!(out, "{:>10}", "vol \\ spot")?;
            for ds in &grid.spot_shifts_pct {
                write!(out, " {:>12}", format!("{:+}%", ds))?;
            }
            writeln!(out)?;
            for (row, dv) in grid.totals.iter().zip(&grid.vol_shifts) {
                write!(out, "{:>10}", format!("{:+}", dv))?;
                for total in row {
                    write!(out, " {:>12.4}", total)?;
                }
                writeln!(out)?;
            }
            Ok(())
        }
    }
}

/// Writes a P&L profile.
pub fn write_pnl<W: Write>(out: &mut W, profile: &PnlProfile, format: Format) -> Result<()> {
    match format {
        Format::Json => write_json(out, profile),
        Format::Csv => {
            let mut csv = csv::Writer::from_writer(out);
            csv.write_record(["spot", "payoff", "pnl"])?;
            for ((spot, payoff), pnl) in profile.curve.spots.iter().zip(&profile.curve.payoffs).zip(&profile.pnl) {
                csv.write_record([spot.to_string(), payoff.to_string(), pnl.to_string()])?;
            }
            csv.flush()?;
            Ok(())
        }
        Format::Table => {
            writeln!(out, "premium      {:.6}", profile.premium)?;
            writeln!(out, "max pnl      {:.6}", profile.max_pnl)?;
            writeln!(out, "min pnl      {:.6}", profile.min_pnl)?;
            match profile.max_profit {
                Some(max_profit) => writeln!(out, "max profit   {:.6}", max_profit)?,
                None => writeln!(out, "max profit   unlimited")?,
            }
            writeln!(out, "max loss     {:.6}", profile.max_loss)?;
            let breakevens: Vec<String> = profile.breakevens.iter().map(|b| format!("{:.4}", b)).collect();
            writeln!(out, "breakevens   {}", breakevens.join(", "))?;
            if !profile.curve.included_leg_ids.is_empty() {
                writeln!(out, "included     {}", profile.curve.included_leg_ids.join(", "))?;
            }
            for excluded in &profile.curve.excluded {
                writeln!(out, "excluded     {}: {}", excluded.leg_id, excluded.reason)?;
            }
            writeln!(out)?;
            writeln!(out, "{:>12} {:>14} {:>14}", "spot", "payoff", "pnl")?;
            for ((spot, payoff), pnl) in profile.curve.spots.iter().zip(&profile.curve.payoffs).zip(&profile.pnl) {
                writeln!(out, "{:>12.4} {:>14.6} {:>14.6}", spot, payoff, pnl)?;
            }
            Ok(())
        }
    }
}
