//! CSV stock catalog adapter.
//!
//! Expected header: `symbol,type,last_dividend,fixed_dividend,par_value,price`.
//! `type` is `common` or `preferred`; `fixed_dividend` is a percentage, so
//! `2` means a 2% ratio. Empty numeric cells read as 0.

use crate::domain::error::GbceError;
use crate::domain::stock::Stock;
use crate::ports::catalog_port::CatalogPort;
use csv::StringRecord;
use std::fs;
use std::path::PathBuf;

pub struct CsvCatalogAdapter {
    path: PathBuf,
}

impl CsvCatalogAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Parses catalog rows from already-read CSV text.
    pub fn parse(content: &str) -> Result<Vec<Stock>, GbceError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());
        let mut stocks = Vec::new();

        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| GbceError::Catalog {
                reason: format!("CSV parse error: {}", e),
            })?;
            // header is line 1
            stocks.push(parse_stock(&record, row + 2)?);
        }

        Ok(stocks)
    }
}

fn parse_stock(record: &StringRecord, line: usize) -> Result<Stock, GbceError> {
    let symbol = record.get(0).ok_or_else(|| GbceError::Catalog {
        reason: format!("line {}: missing symbol column", line),
    })?;
    let kind = record.get(1).ok_or_else(|| GbceError::Catalog {
        reason: format!("line {}: missing type column", line),
    })?;

    let last_dividend = parse_number(record, 2, "last_dividend", line)?;
    let fixed_dividend_pct = parse_number(record, 3, "fixed_dividend", line)?;
    let par_value = parse_number(record, 4, "par_value", line)?;
    let price = parse_number(record, 5, "price", line)?;

    match kind.to_lowercase().as_str() {
        "common" => Stock::common(symbol, last_dividend, price),
        "preferred" => Stock::preferred(symbol, fixed_dividend_pct / 100.0, par_value, price),
        other => Err(GbceError::Catalog {
            reason: format!("line {}: unknown stock type {:?}", line, other),
        }),
    }
}

fn parse_number(
    record: &StringRecord,
    index: usize,
    column: &str,
    line: usize,
) -> Result<f64, GbceError> {
    let raw = record.get(index).ok_or_else(|| GbceError::Catalog {
        reason: format!("line {}: missing {} column", line, column),
    })?;
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse().map_err(|e| GbceError::Catalog {
        reason: format!("line {}: invalid {} value {:?}: {}", line, column, raw, e),
    })
}

impl CatalogPort for CsvCatalogAdapter {
    fn load_stocks(&self) -> Result<Vec<Stock>, GbceError> {
        let content = fs::read_to_string(&self.path).map_err(|e| GbceError::Catalog {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        let stocks = Self::parse(&content)?;
        tracing::debug!(path = %self.path.display(), count = stocks.len(), "loaded catalog");
        Ok(stocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tempfile::TempDir;

    const SAMPLE: &str = "symbol,type,last_dividend,fixed_dividend,par_value,price\n\
        TEA,common,0,,100,34.42\n\
        POP,preferred,,3.5,100,47.48\n\
        ALE,common,23,,60,24.43\n\
        GIN,preferred,8,2,100,15.45\n\
        JOE,common,13,,250,33.52\n";

    #[test]
    fn parse_reads_all_rows() {
        let stocks = CsvCatalogAdapter::parse(SAMPLE).unwrap();
        assert_eq!(stocks.len(), 5);
        assert_eq!(stocks[0].symbol(), "TEA");
        assert!(stocks[0].is_common());
        assert_eq!(stocks[0].price(), 34.42);
        assert!(stocks[3].is_preferred());
    }

    #[test]
    fn preferred_fixed_dividend_is_a_percentage() {
        let stocks = CsvCatalogAdapter::parse(SAMPLE).unwrap();
        let gin = &stocks[3];
        assert_relative_eq!(gin.dividend_yield(), 2.0 / 15.45, epsilon = 1e-12);
    }

    #[test]
    fn sample_rows_match_builtin_catalog() {
        let parsed = CsvCatalogAdapter::parse(SAMPLE).unwrap();
        let builtin = crate::domain::sample::sample_catalog().unwrap();
        assert_eq!(parsed.len(), builtin.len());
        for (csv, sample) in parsed.iter().zip(&builtin) {
            assert_eq!(csv, sample);
            assert_eq!(csv.is_preferred(), sample.is_preferred());
            assert_eq!(csv.price(), sample.price());
            assert_relative_eq!(csv.dividend_yield(), sample.dividend_yield(), epsilon = 1e-12);
        }
        let pop = &parsed[1];
        assert!(pop.is_preferred());
        assert_relative_eq!(pop.dividend_yield(), 3.5 / 47.48, epsilon = 1e-12);
    }

    #[test]
    fn type_is_case_insensitive_and_cells_trimmed() {
        let content = "symbol,type,last_dividend,fixed_dividend,par_value,price\n\
            TEA , Common , 0 , , 100 , 34.42\n";
        let stocks = CsvCatalogAdapter::parse(content).unwrap();
        assert_eq!(stocks[0].symbol(), "TEA");
        assert_eq!(stocks[0].price(), 34.42);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let content = "symbol,type,last_dividend,fixed_dividend,par_value,price\n\
            TEA,ordinary,0,,100,34.42\n";
        let err = CsvCatalogAdapter::parse(content).unwrap_err();
        assert!(matches!(err, GbceError::Catalog { ref reason } if reason.contains("line 2")));
    }

    #[test]
    fn invalid_number_is_rejected() {
        let content = "symbol,type,last_dividend,fixed_dividend,par_value,price\n\
            TEA,common,0,,100,abc\n";
        assert!(matches!(
            CsvCatalogAdapter::parse(content),
            Err(GbceError::Catalog { .. })
        ));
    }

    #[test]
    fn invalid_symbol_surfaces_domain_error() {
        let content = "symbol,type,last_dividend,fixed_dividend,par_value,price\n\
            tea,common,0,,100,34.42\n";
        assert!(matches!(
            CsvCatalogAdapter::parse(content),
            Err(GbceError::InvalidSymbol { .. })
        ));
    }

    #[test]
    fn load_stocks_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gbce.csv");
        fs::write(&path, SAMPLE).unwrap();

        let adapter = CsvCatalogAdapter::new(path);
        let stocks = adapter.load_stocks().unwrap();
        assert_eq!(stocks.len(), 5);
    }

    #[test]
    fn load_stocks_missing_file() {
        let adapter = CsvCatalogAdapter::new(PathBuf::from("/nonexistent/gbce.csv"));
        assert!(matches!(
            adapter.load_stocks(),
            Err(GbceError::Catalog { .. })
        ));
    }
}
