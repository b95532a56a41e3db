//! Two-sheet workbook rendering for a finished scan.

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::scanner::ScanReport;

const OPPORTUNITY_HEADERS: [&str; 17] = [
    "Ticker",
    "Company",
    "Country",
    "Index",
    "Sector",
    "Date",
    "Price",
    "RSI",
    "MA short > MA long",
    "Volume boosted",
    "Score",
    "Weighted score",
    "Gain/risk ratio",
    "Verdict",
    "Stop loss",
    "Target 1",
    "Target 2",
];

/// Static interpretation table written to the `Guide` sheet.
const GUIDE_ROWS: [[&str; 3]; 6] = [
    [
        "Score (out of 3)",
        "Count of satisfied rules (RSI, MA crossover, volume)",
        "At or above the configured minimum = retained signal",
    ],
    [
        "Weighted score",
        "Sum of configured weights for satisfied rules",
        "Higher = stronger priority",
    ],
    [
        "RSI",
        "Oversold below the low threshold, overbought above the high one",
        "Low = possible rebound / high = caution",
    ],
    [
        "Gain/risk ratio",
        "Target 1 gain divided by stop-loss risk",
        "Above 1.5 = good trade setup",
    ],
    [
        "MA short > MA long",
        "Short-term trend above the long-term trend",
        "True = bullish momentum",
    ],
    [
        "Volume boosted",
        "Current volume above the boosted trailing average",
        "True = market interest",
    ],
];

/// Build the workbook in memory. An empty report still yields both
/// sheets with headers, so the attachment is never missing.
pub fn build_workbook(report: &ScanReport) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();

    let header_format = Format::new().set_bold();
    let rsi_format = Format::new().set_num_format("0.0");

    let sheet = workbook.add_worksheet();
    sheet.set_name("Opportunities")?;
    for (col, header) in OPPORTUNITY_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (i, opp) in report.opportunities.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, &opp.ticker)?;
        sheet.write_string(row, 1, &opp.meta.company)?;
        sheet.write_string(row, 2, &opp.meta.country)?;
        sheet.write_string(row, 3, &opp.meta.index)?;
        sheet.write_string(row, 4, &opp.meta.sector)?;
        sheet.write_string(row, 5, opp.date.format("%Y-%m-%d").to_string())?;
        sheet.write_number(row, 6, opp.price)?;
        sheet.write_number_with_format(row, 7, opp.snapshot.rsi, &rsi_format)?;
        sheet.write_boolean(row, 8, opp.score.ma_bullish)?;
        sheet.write_boolean(row, 9, opp.score.volume_boosted)?;
        sheet.write_number(row, 10, opp.score.raw_score as f64)?;
        sheet.write_number(row, 11, opp.score.weighted_score)?;
        sheet.write_number(row, 12, opp.targets.gain_risk_ratio)?;
        sheet.write_string(row, 13, opp.score.verdict.to_string())?;
        sheet.write_number(row, 14, opp.targets.stop_loss)?;
        sheet.write_number(row, 15, opp.targets.target1)?;
        sheet.write_number(row, 16, opp.targets.target2)?;
    }

    let guide = workbook.add_worksheet();
    guide.set_name("Guide")?;
    write_guide(guide, &header_format)?;

    Ok(workbook)
}

fn write_guide(sheet: &mut Worksheet, header_format: &Format) -> Result<(), XlsxError> {
    for (col, header) in ["Column", "Meaning", "How to act"].iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, header_format)?;
    }
    for (i, row) in GUIDE_ROWS.iter().enumerate() {
        for (col, cell) in row.iter().enumerate() {
            sheet.write_string((i + 1) as u32, col as u16, *cell)?;
        }
    }
    Ok(())
}

/// Render the report and return the workbook bytes, also writing them
/// to `path` for the operator.
pub fn write_workbook(
    report: &ScanReport,
    path: &str,
) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
    let mut workbook = build_workbook(report)?;
    let bytes = workbook.save_to_buffer()?;
    std::fs::write(path, &bytes)?;
    Ok(bytes)
}
