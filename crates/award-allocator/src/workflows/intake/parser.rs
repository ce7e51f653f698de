use super::normalizer::normalize_header;
use crate::workflows::allocation::Applicant;
use csv::StringRecord;
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) const REQUIRED_HEADERS: [&str; 4] =
    ["applicant_id", "score", "need_level", "requested_amount"];

/// Result of reading one data row: a usable applicant or a warning that skips the row.
#[derive(Debug)]
pub(crate) enum ParsedRow {
    Applicant { line: u64, applicant: Applicant },
    Skipped(String),
}

pub(crate) struct ParsedSheet {
    pub(crate) missing_headers: Vec<String>,
    pub(crate) rows: Vec<ParsedRow>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<ParsedSheet, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: StringRecord = csv_reader
        .headers()?
        .iter()
        .map(normalize_header)
        .collect();
    let missing_headers: Vec<String> = REQUIRED_HEADERS
        .iter()
        .filter(|required| !headers.iter().any(|header| header == **required))
        .map(|required| required.to_string())
        .collect();
    if !missing_headers.is_empty() {
        return Ok(ParsedSheet {
            missing_headers,
            rows: Vec::new(),
        });
    }
    csv_reader.set_headers(headers.clone());

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                let line = err.position().map(|pos| pos.line()).unwrap_or_default();
                rows.push(ParsedRow::Skipped(format!("line {line}: {err}")));
                continue;
            }
        };
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        let parsed = match record.deserialize::<ApplicantRow>(Some(&headers)) {
            Ok(row) => row.into_applicant(line),
            Err(err) => ParsedRow::Skipped(format!("line {line}: {err}")),
        };
        rows.push(parsed);
    }

    Ok(ParsedSheet {
        missing_headers,
        rows,
    })
}

#[derive(Debug, Deserialize)]
struct ApplicantRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    applicant_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    score: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    need_level: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    requested_amount: Option<String>,
}

impl ApplicantRow {
    fn into_applicant(self, line: u64) -> ParsedRow {
        let Some(id) = self.applicant_id else {
            return ParsedRow::Skipped(format!("line {line}: missing applicant_id"));
        };
        let Some(score) = self
            .score
            .as_deref()
            .and_then(parse_amount)
            .filter(|score| *score >= 0.0)
        else {
            return ParsedRow::Skipped(format!("line {line}: invalid score"));
        };
        let Some(requested) = self.requested_amount.as_deref().and_then(parse_amount) else {
            return ParsedRow::Skipped(format!("line {line}: invalid requested_amount"));
        };

        ParsedRow::Applicant {
            line,
            applicant: Applicant::new(
                id,
                self.name,
                self.need_level.unwrap_or_default(),
                score,
                requested,
            ),
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_amount(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(csv: &str) -> ParsedSheet {
        parse_rows(Cursor::new(csv)).expect("csv parses")
    }

    #[test]
    fn reports_missing_required_headers() {
        let sheet = parse("applicant_id,name,score\nA1,Ann,90\n");

        assert_eq!(sheet.missing_headers, vec!["need_level", "requested_amount"]);
        assert!(sheet.rows.is_empty());
    }

    #[test]
    fn amounts_reject_non_numeric_and_non_finite_values() {
        assert_eq!(parse_amount(" 1200.50 "), Some(1200.5));
        assert_eq!(parse_amount("-40"), Some(-40.0));
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(parse_amount("inf"), None);
        assert_eq!(parse_amount("abc"), None);
    }

    #[test]
    fn negative_score_skips_row_but_negative_request_is_kept() {
        let sheet = parse(
            "applicant_id,score,need_level,requested_amount\n\
             A1,-5,high,1000\n\
             A2,80,high,-100\n",
        );

        match &sheet.rows[0] {
            ParsedRow::Skipped(warning) => assert_eq!(warning, "line 2: invalid score"),
            other => panic!("expected skipped row, got {other:?}"),
        }
        match &sheet.rows[1] {
            ParsedRow::Applicant { line, applicant } => {
                assert_eq!(*line, 3);
                assert_eq!(applicant.requested, -100.0);
            }
            other => panic!("expected applicant, got {other:?}"),
        }
    }
}
