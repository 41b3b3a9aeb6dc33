use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsPeriod {
    Week,
    #[default]
    Month,
    Year,
}

impl StatsPeriod {
    /// Value of the `periodo` query parameter on GET /graficos.
    pub fn as_query(&self) -> &'static str {
        match self {
            StatsPeriod::Week => "semana",
            StatsPeriod::Month => "mes",
            StatsPeriod::Year => "anio",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatsPeriod::Week => "última semana",
            StatsPeriod::Month => "último mes",
            StatsPeriod::Year => "último año",
        }
    }

    pub fn parse(raw: &str) -> Option<StatsPeriod> {
        match raw {
            "semana" => Some(StatsPeriod::Week),
            "mes" => Some(StatsPeriod::Month),
            "anio" => Some(StatsPeriod::Year),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeriesPoint {
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "total")]
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelCount {
    #[serde(rename = "etiqueta")]
    pub label: String,
    #[serde(rename = "total")]
    pub count: u32,
}

/// Aggregate report from GET /graficos. Every section is optional on the
/// wire; missing sections come back as empty lists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsReport {
    #[serde(rename = "adopciones", default)]
    pub adoptions: Vec<SeriesPoint>,
    #[serde(rename = "citas", default)]
    pub appointments: Vec<SeriesPoint>,
    #[serde(rename = "sexo", default)]
    pub by_sex: Vec<LabelCount>,
    #[serde(rename = "especies", default)]
    pub by_species: Vec<LabelCount>,
    #[serde(rename = "nuevosAnimales", default)]
    pub new_animals: Vec<SeriesPoint>,
    #[serde(rename = "edades", default)]
    pub by_age: Vec<LabelCount>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
    pub date: NaiveDate,
    pub adoptions: u32,
    pub appointments: u32,
}

/// Merge the adoption and appointment series into one table keyed by date,
/// filling the gaps with zero so both lines cover the same axis.
pub fn merge_comparison(adoptions: &[SeriesPoint], appointments: &[SeriesPoint]) -> Vec<ComparisonRow> {
    let mut merged: BTreeMap<NaiveDate, (u32, u32)> = BTreeMap::new();
    for point in adoptions {
        merged.entry(point.date).or_default().0 += point.count;
    }
    for point in appointments {
        merged.entry(point.date).or_default().1 += point.count;
    }
    merged
        .into_iter()
        .map(|(date, (adoptions, appointments))| ComparisonRow {
            date,
            adoptions,
            appointments,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn merge_fills_missing_dates_with_zero() {
        let adoptions = vec![SeriesPoint { date: day(2), count: 3 }];
        let appointments = vec![
            SeriesPoint { date: day(1), count: 1 },
            SeriesPoint { date: day(2), count: 2 },
        ];
        let rows = merge_comparison(&adoptions, &appointments);
        assert_eq!(
            rows,
            vec![
                ComparisonRow { date: day(1), adoptions: 0, appointments: 1 },
                ComparisonRow { date: day(2), adoptions: 3, appointments: 2 },
            ]
        );
    }
}
