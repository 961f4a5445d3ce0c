use std::collections::HashMap;

/// One data line of the input table, keyed by header name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: HashMap<String, String>,
}

impl RawRow {
    /// Cell value for `column`, or `""` when the column is absent.
    pub fn get(&self, column: &str) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        RawRow {
            cells: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// A physical record before header mapping.
struct Record {
    fields: Vec<String>,
    quoted: bool,
}

impl Record {
    fn is_blank(&self) -> bool {
        !self.quoted && self.fields.len() == 1 && self.fields[0].trim().is_empty()
    }
}

/// Parse comma-separated text with a header row into rows keyed by header.
///
/// Never fails: short rows are padded with `""`, extra cells are dropped,
/// blank lines are skipped and an unterminated quote runs to end of input.
pub fn parse_rows(text: &str) -> Vec<RawRow> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut records = split_records(text).into_iter().filter(|r| !r.is_blank());

    let Some(header) = records.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = header.fields.iter().map(|h| h.trim().to_string()).collect();

    records
        .map(|record| {
            let mut cells = HashMap::with_capacity(headers.len());
            for (i, name) in headers.iter().enumerate() {
                if name.is_empty() {
                    continue;
                }
                let value = record.fields.get(i).cloned().unwrap_or_default();
                // Duplicate header names: first column wins
                cells.entry(name.clone()).or_insert(value);
            }
            RawRow { cells }
        })
        .collect()
}

fn split_records(text: &str) -> Vec<Record> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => {
                in_quotes = true;
                quoted = true;
            }
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\r' | '\n' => {
                fields.push(std::mem::take(&mut field));
                records.push(Record {
                    fields: std::mem::take(&mut fields),
                    quoted,
                });
                quoted = false;
            }
            _ => field.push(c),
        }
    }

    if quoted || !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        records.push(Record { fields, quoted });
    }

    records
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_keys_rows() {
        let rows = parse_rows("Title,Text\nHello,World\nSecond,Row\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Title"), "Hello");
        assert_eq!(rows[1].get("Text"), "Row");
    }

    #[test]
    fn quoted_fields_keep_commas_quotes_and_newlines() {
        let rows = parse_rows("Title,Text\n\"a, b\",\"say \"\"hi\"\"\nthere\"\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Title"), "a, b");
        assert_eq!(rows[0].get("Text"), "say \"hi\"\nthere");
    }

    #[test]
    fn short_rows_are_padded_and_long_rows_truncated() {
        let rows = parse_rows("A,B,C\n1\n1,2,3,4\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("A"), "1");
        assert_eq!(rows[0].get("C"), "");
        assert_eq!(rows[1].get("C"), "3");
    }

    #[test]
    fn blank_lines_and_crlf() {
        let rows = parse_rows("A,B\r\n\r\nx,y\r\n   \r\nz,w");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("B"), "y");
        assert_eq!(rows[1].get("A"), "z");
    }

    #[test]
    fn header_only_and_empty_input() {
        assert!(parse_rows("Title,Text\n").is_empty());
        assert!(parse_rows("").is_empty());
        assert!(parse_rows("\n\n").is_empty());
    }

    #[test]
    fn bom_and_padded_headers() {
        let rows = parse_rows("\u{feff} Title , Text\nx,y\n");
        assert_eq!(rows[0].get("Title"), "x");
        assert_eq!(rows[0].get("Text"), "y");
    }

    #[test]
    fn quoted_empty_line_is_a_row() {
        let rows = parse_rows("A\n\"\"\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("A"), "");
    }

    #[test]
    fn unterminated_quote_runs_to_eof() {
        let rows = parse_rows("A,B\nx,\"open\nstill open");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("B"), "open\nstill open");
    }

    #[test]
    fn unknown_column_lookup_is_empty() {
        let rows = parse_rows("A\n1\n");
        assert_eq!(rows[0].get("Missing"), "");
    }
}
