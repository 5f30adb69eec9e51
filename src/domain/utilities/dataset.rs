//! Tabular mock datasets rendered as JSON, CSV, YAML or SQL.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::str::FromStr;

use super::fake_data::{self, FakeKind, FakeLocale};
use super::UtilityError;

pub const DEFAULT_TABLE: &str = "mock_data";
pub const MAX_FIELDS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetFormat {
    #[default]
    Json,
    Csv,
    Yaml,
    Sql,
}

impl DatasetFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            DatasetFormat::Json => "application/json",
            DatasetFormat::Csv => "text/csv",
            DatasetFormat::Yaml => "application/yaml",
            DatasetFormat::Sql => "application/sql",
        }
    }
}

impl FromStr for DatasetFormat {
    type Err = UtilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(DatasetFormat::Json),
            "csv" => Ok(DatasetFormat::Csv),
            "yaml" | "yml" => Ok(DatasetFormat::Yaml),
            "sql" => Ok(DatasetFormat::Sql),
            other => Err(UtilityError::invalid(
                "format",
                format!("unsupported format '{}' (supported: json, csv, yaml, sql)", other),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FakeKind,
}

impl FieldSpec {
    pub fn new(name: &str, kind: &str) -> Result<Self, UtilityError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(UtilityError::invalid("fields", "field names must not be empty"));
        }
        Ok(Self {
            name: name.to_string(),
            kind: kind.parse()?,
        })
    }
}

/// Generated rows; every row has one value per column, in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedDataset {
    pub format: DatasetFormat,
    pub count: u32,
    pub content_type: &'static str,
    pub content: String,
}

/// Generates `count` rows for `fields`.
pub fn generate(
    fields: &[FieldSpec],
    count: Option<u32>,
    locale: FakeLocale,
) -> Result<Dataset, UtilityError> {
    if fields.is_empty() {
        return Err(UtilityError::invalid("fields", "at least one field is required"));
    }
    if fields.len() > MAX_FIELDS {
        return Err(UtilityError::invalid(
            "fields",
            format!("at most {} fields are allowed", MAX_FIELDS),
        ));
    }
    let mut seen = HashSet::new();
    for field in fields {
        if !seen.insert(field.name.as_str()) {
            return Err(UtilityError::invalid(
                "fields",
                format!("duplicate field name '{}'", field.name),
            ));
        }
    }
    let count = fake_data::validate_count(count)?;

    let rows = (0..count)
        .map(|_| {
            fields
                .iter()
                .map(|field| fake_data::scalar(field.kind, locale))
                .collect()
        })
        .collect();
    Ok(Dataset {
        columns: fields.iter().map(|f| f.name.clone()).collect(),
        rows,
    })
}

impl Dataset {
    pub fn render(&self, format: DatasetFormat, table: Option<&str>) -> Result<RenderedDataset, UtilityError> {
        let content = match format {
            DatasetFormat::Json => self.to_json()?,
            DatasetFormat::Csv => self.to_csv()?,
            DatasetFormat::Yaml => self.to_yaml()?,
            DatasetFormat::Sql => self.to_sql(table.map(str::trim).filter(|t| !t.is_empty()).unwrap_or(DEFAULT_TABLE)),
        };
        Ok(RenderedDataset {
            format,
            count: self.rows.len() as u32,
            content_type: format.content_type(),
            content,
        })
    }

    fn records(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let record: Map<String, Value> = self
                    .columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned().map(Value::String))
                    .collect();
                Value::Object(record)
            })
            .collect()
    }

    fn to_json(&self) -> Result<String, UtilityError> {
        serde_json::to_string_pretty(&self.records())
            .map_err(|e| UtilityError::invalid("format", e.to_string()))
    }

    fn to_yaml(&self) -> Result<String, UtilityError> {
        serde_yaml::to_string(&self.records())
            .map_err(|e| UtilityError::invalid("format", e.to_string()))
    }

    fn to_csv(&self) -> Result<String, UtilityError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        let to_err = |e: csv::Error| UtilityError::invalid("format", e.to_string());
        writer.write_record(&self.columns).map_err(to_err)?;
        for row in &self.rows {
            writer.write_record(row).map_err(to_err)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| UtilityError::invalid("format", e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| UtilityError::invalid("format", e.to_string()))
    }

    fn to_sql(&self, table: &str) -> String {
        let columns = self
            .columns
            .iter()
            .map(|c| quote_identifier(c))
            .collect::<Vec<_>>()
            .join(", ");
        let table = quote_identifier(table);
        self.rows
            .iter()
            .map(|row| {
                let values = row
                    .iter()
                    .map(|v| format!("'{}'", v.replace('\'', "''")))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("INSERT INTO {} ({}) VALUES ({});", table, columns, values)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed() -> Dataset {
        Dataset {
            columns: vec!["id".into(), "note".into()],
            rows: vec![
                vec!["1".into(), "it's fine".into()],
                vec!["2".into(), "a, \"quoted\" value".into()],
            ],
        }
    }

    #[test]
    fn rejects_duplicate_and_empty_fields() {
        assert!(FieldSpec::new("  ", "name").is_err());
        let fields = vec![
            FieldSpec::new("a", "name").unwrap(),
            FieldSpec::new("a", "email").unwrap(),
        ];
        assert!(generate(&fields, Some(1), FakeLocale::EnUs).is_err());
        assert!(generate(&[], Some(1), FakeLocale::EnUs).is_err());
    }

    #[test]
    fn unknown_field_type_is_rejected() {
        assert!(FieldSpec::new("x", "spaceship").is_err());
    }

    #[test]
    fn generates_one_value_per_field() {
        let fields = vec![
            FieldSpec::new("id", "uuid").unwrap(),
            FieldSpec::new("nome", "name").unwrap(),
            FieldSpec::new("email", "email").unwrap(),
        ];
        let dataset = generate(&fields, Some(5), FakeLocale::PtBr).unwrap();
        assert_eq!(dataset.columns, ["id", "nome", "email"]);
        assert_eq!(dataset.rows.len(), 5);
        assert!(dataset.rows.iter().all(|r| r.len() == 3));
        assert!(uuid::Uuid::parse_str(&dataset.rows[0][0]).is_ok());
    }

    #[test]
    fn renders_json_array_in_column_order() {
        let rendered = fixed().render(DatasetFormat::Json, None).unwrap();
        let value: Value = serde_json::from_str(&rendered.content).unwrap();
        assert_eq!(value[1]["id"], "2");
        assert!(rendered.content.find("\"id\"").unwrap() < rendered.content.find("\"note\"").unwrap());
    }

    #[test]
    fn renders_csv_with_rfc4180_quoting() {
        let rendered = fixed().render(DatasetFormat::Csv, None).unwrap();
        assert_eq!(
            rendered.content,
            "id,note\n1,it's fine\n2,\"a, \"\"quoted\"\" value\"\n"
        );
        assert_eq!(rendered.content_type, "text/csv");
    }

    #[test]
    fn renders_yaml_sequence() {
        let rendered = fixed().render(DatasetFormat::Yaml, None).unwrap();
        let parsed: Vec<Map<String, Value>> = serde_yaml::from_str(&rendered.content).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["note"], "it's fine");
    }

    #[test]
    fn renders_sql_inserts_with_escaped_quotes() {
        let rendered = fixed().render(DatasetFormat::Sql, Some("people")).unwrap();
        let lines: Vec<&str> = rendered.content.lines().collect();
        assert_eq!(
            lines[0],
            "INSERT INTO \"people\" (\"id\", \"note\") VALUES ('1', 'it''s fine');"
        );
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn sql_defaults_table_name() {
        let rendered = fixed().render(DatasetFormat::Sql, Some(" ")).unwrap();
        assert!(rendered.content.starts_with("INSERT INTO \"mock_data\""));
    }

    #[test]
    fn format_names_parse() {
        assert_eq!("YML".parse::<DatasetFormat>().unwrap(), DatasetFormat::Yaml);
        assert!("xml".parse::<DatasetFormat>().is_err());
    }
}
