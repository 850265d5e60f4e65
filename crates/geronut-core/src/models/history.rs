use jiff::Timestamp;
use jiff::civil::DateTime;
use jiff::tz::TimeZone;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;

/// One anthropometric save: when it happened and the weight recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultationEntry {
    #[serde(rename = "data", with = "lenient_timestamp")]
    pub at: Timestamp,
    /// `None` when the save carried no current weight. Older files wrote
    /// `0` for that case; it loads as `None`.
    #[serde(rename = "peso", default, deserialize_with = "weight_or_unset")]
    pub weight_kg: Option<f64>,
}

/// Append-only, chronologically ordered consultation history.
/// Persisted under `historico`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ConsultationEntry>")]
pub struct ConsultationHistory(Vec<ConsultationEntry>);

impl ConsultationHistory {
    /// Append an entry. A timestamp earlier than the last entry (clock
    /// skew) is raised to it so the sequence never goes backwards.
    pub fn push(&mut self, at: Timestamp, weight_kg: Option<f64>) -> &ConsultationEntry {
        let at = match self.0.last() {
            Some(last) if last.at > at => last.at,
            _ => at,
        };
        self.0.push(ConsultationEntry { at, weight_kg });
        &self.0[self.0.len() - 1]
    }

    pub fn entries(&self) -> &[ConsultationEntry] {
        &self.0
    }

    pub fn last(&self) -> Option<&ConsultationEntry> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<ConsultationEntry>> for ConsultationHistory {
    type Error = CoreError;

    fn try_from(entries: Vec<ConsultationEntry>) -> Result<Self, Self::Error> {
        if let Some(index) = entries.windows(2).position(|w| w[1].at < w[0].at) {
            return Err(CoreError::HistoryOutOfOrder { index: index + 1 });
        }
        Ok(Self(entries))
    }
}

/// Parse a history timestamp: RFC 3339, or the older `dd/mm/YYYY HH:MM`
/// and offset-less ISO forms, both read as UTC.
pub fn parse_timestamp(raw: &str) -> Result<Timestamp, CoreError> {
    let raw = raw.trim();
    if let Ok(ts) = raw.parse::<Timestamp>() {
        return Ok(ts);
    }
    let civil = DateTime::strptime("%d/%m/%Y %H:%M", raw)
        .or_else(|_| raw.parse::<DateTime>())
        .map_err(|_| CoreError::InvalidTimestamp(raw.to_string()))?;
    civil
        .to_zoned(TimeZone::UTC)
        .map(|zoned| zoned.timestamp())
        .map_err(|_| CoreError::InvalidTimestamp(raw.to_string()))
}

fn weight_or_unset<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.filter(|weight| *weight != 0.0))
}

mod lenient_timestamp {
    use jiff::Timestamp;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(ts)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}
