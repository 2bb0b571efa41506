use std::io::Cursor;

use calamine::{Data, Range, Reader};
use regex::Regex;

use crate::accounts::normalize_name;
use crate::error::{AcvError, Result};
use crate::models::ParsedBalanceSet;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn month_number(name: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .position(|m| m.eq_ignore_ascii_case(name))
        .map(|i| i as u32 + 1)
}

/// Full English name for a month in 1..=12, empty string otherwise.
pub fn month_name(month: u32) -> &'static str {
    (month as usize)
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i).copied())
        .unwrap_or("")
}

pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned = raw.replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty()
        || !cleaned.chars().all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.'))
    {
        return None;
    }
    cleaned.parse().ok()
}

fn cell_text(range: &Range<Data>, row: u32, col: u32) -> Option<String> {
    let text = match range.get_value((row, col))? {
        Data::Empty => return None,
        Data::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Extract a validated balance set from raw spreadsheet bytes.
///
/// The first worksheet must carry a header in A1 of the form
/// `Account Balances for <Month> <Year>` and exactly five data rows in
/// rows 2-6: account name in column A, amount in column B. Reads only the
/// given bytes; the same input always yields the same result.
pub fn parse_balance_sheet(bytes: &[u8]) -> Result<ParsedBalanceSet> {
    let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| AcvError::MalformedInput(format!("cannot open workbook: {e}")))?;

    let first_sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| AcvError::MalformedInput("workbook contains no worksheets".to_string()))?;
    let range = workbook
        .worksheet_range(&first_sheet)
        .map_err(|e| AcvError::MalformedInput(format!("cannot read worksheet: {e}")))?;

    let header = cell_text(&range, 0, 0)
        .ok_or_else(|| AcvError::MalformedInput("missing header in cell A1".to_string()))?;

    let header_re = Regex::new(r"(?i)for\s+([A-Za-z]+)\s+(\d{4})\b")
        .map_err(|e| AcvError::Other(format!("header pattern: {e}")))?;
    let captures = header_re.captures(&header).ok_or_else(|| {
        AcvError::MalformedInput(
            "invalid header, expected 'Account Balances for <Month> <Year>'".to_string(),
        )
    })?;

    let month_text = &captures[1];
    let month = month_number(month_text)
        .ok_or_else(|| AcvError::MalformedInput(format!("unrecognized month name: {month_text}")))?;
    let year: i32 = captures[2]
        .parse()
        .map_err(|_| AcvError::MalformedInput(format!("invalid year: {}", &captures[2])))?;

    let mut balances = Vec::with_capacity(5);
    for row in 2..=6u32 {
        let idx = row - 1;
        let name = cell_text(&range, idx, 0)
            .ok_or_else(|| AcvError::MalformedInput(format!("missing account name in row {row}")))?;
        let raw_amount = cell_text(&range, idx, 1)
            .ok_or_else(|| AcvError::MalformedInput(format!("missing balance value in row {row}")))?;
        let amount = parse_amount(&raw_amount).ok_or_else(|| {
            AcvError::MalformedInput(format!("invalid balance in row {row}: {raw_amount}"))
        })?;
        balances.push((normalize_name(&name), amount));
    }

    // The fixed row range makes more than five impossible; fewer means a
    // blank row slipped through above.
    if balances.len() != 5 {
        return Err(AcvError::MalformedInput(format!(
            "expected 5 account balances, found {}",
            balances.len()
        )));
    }

    Ok(ParsedBalanceSet { year, month, balances })
}
