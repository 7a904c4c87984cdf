// src/output/tsv.rs

use anyhow::{anyhow, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::catalog::{Column, StarRecord};
use crate::normalize::PLACEHOLDER;

/// Header row plus one tab-separated row per record. Absent fields are `-`.
pub fn to_tsv(records: &[StarRecord]) -> Result<String> {
    let mut wtr = WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let absent = PLACEHOLDER.to_string();
    wtr.write_record(Column::ALL.iter().map(|c| c.header()))?;
    for record in records {
        wtr.write_record(Column::ALL.iter().map(|&c| record.get(c).unwrap_or(absent.as_str())))?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow!("flushing TSV writer: {}", e.error()))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{fixtures::SAMPLE, parse_catalog, Field};

    #[test]
    fn test_tsv_layout() -> Result<()> {
        let catalog = parse_catalog(SAMPLE)?;
        let tsv = to_tsv(&catalog.records)?;
        let lines: Vec<&str> = tsv.lines().collect();

        assert_eq!(
            lines[0],
            "Name/ASCII\tName/Diacritics\tDesignation\tID\tID/Diacritics\tCon\t#\tWDS_J\tmag\tbnd\tHIP\tHD\tRA(J2000)\tDec(J2000)\tDate\tnotes"
        );
        assert_eq!(
            lines[3],
            "Lich\tLich\tPSR B1257+12\t-\t-\tVir\t-\t-\t12.2\t-\t-\t-\t195.014953\t12.682352\t2015-12-15\t@"
        );
        for line in &lines {
            assert_eq!(line.split('\t').count(), Column::ALL.len());
        }

        // absent cells print exactly as an absent field does in text
        let lich: Vec<&str> = lines[3].split('\t').collect();
        assert_eq!(lich[3], Field::Absent.to_string());
        assert_eq!(lich[3], PLACEHOLDER.to_string());
        Ok(())
    }
}
