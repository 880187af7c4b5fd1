//! JSON Lines codec for stored samples.
//!
//! JSON has no literal for NaN or infinity and `serde_json` writes them as
//! `null`, which cannot be read back as `f64`. State components are written
//! as numbers when finite and as the strings `"NaN"`, `"inf"` or `"-inf"`
//! otherwise, so a run that blew up reloads exactly as it was recorded.

use crate::types::SampleRecord;
use crate::{ResultsError, ResultsResult};
use ps_core::State;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::io::{BufRead, Write};

const NAN: &str = "NaN";
const POS_INF: &str = "inf";
const NEG_INF: &str = "-inf";

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum StoredValue {
    Number(f64),
    Text(String),
}

impl From<f64> for StoredValue {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            StoredValue::Number(value)
        } else if value.is_nan() {
            StoredValue::Text(NAN.to_string())
        } else if value > 0.0 {
            StoredValue::Text(POS_INF.to_string())
        } else {
            StoredValue::Text(NEG_INF.to_string())
        }
    }
}

impl StoredValue {
    fn into_f64(self) -> Result<f64, String> {
        match self {
            StoredValue::Number(v) => Ok(v),
            StoredValue::Text(s) => match s.as_str() {
                NAN => Ok(f64::NAN),
                POS_INF => Ok(f64::INFINITY),
                NEG_INF => Ok(f64::NEG_INFINITY),
                other => Err(format!("unrecognized state value '{other}'")),
            },
        }
    }
}

pub(crate) fn serialize_state<S>(state: &State, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(state.iter().map(|&v| StoredValue::from(v)))
}

pub(crate) fn deserialize_state<'de, D>(deserializer: D) -> Result<State, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<StoredValue>::deserialize(deserializer)?
        .into_iter()
        .map(|v| v.into_f64().map_err(serde::de::Error::custom))
        .collect()
}

/// Write one JSON object per record, newline terminated.
pub fn write_records<W: Write>(mut writer: W, records: &[SampleRecord]) -> ResultsResult<()> {
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Read records written by [`write_records`]. Blank lines are skipped.
pub fn read_records<R: BufRead>(reader: R) -> ResultsResult<Vec<SampleRecord>> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|source| ResultsError::BadRecord {
            line: index + 1,
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(time_s: f64, state: &[f64]) -> SampleRecord {
        SampleRecord {
            time_s,
            state: state.iter().copied().collect(),
        }
    }

    #[test]
    fn non_finite_components_are_tagged() {
        let line = serde_json::to_string(&record(0.5, &[1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY]))
            .unwrap();
        assert_eq!(line, r#"{"time_s":0.5,"state":[1.0,"NaN","inf","-inf"]}"#);
    }

    #[test]
    fn tagged_components_read_back() {
        let back: SampleRecord =
            serde_json::from_str(r#"{"time_s":1.0,"state":[2,"NaN","-inf"]}"#).unwrap();
        assert_eq!(back.state[0], 2.0);
        assert!(back.state[1].is_nan());
        assert_eq!(back.state[2], f64::NEG_INFINITY);
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let result: Result<SampleRecord, _> =
            serde_json::from_str(r#"{"time_s":1.0,"state":["huge"]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn lines_stream_through_a_buffer() {
        let records = vec![record(0.0, &[1.0]), record(0.1, &[f64::INFINITY])];
        let mut buf = Vec::new();
        write_records(&mut buf, &records).unwrap();

        let text = String::from_utf8(buf.clone()).unwrap();
        assert_eq!(text.lines().count(), 2);

        let back = read_records(buf.as_slice()).unwrap();
        assert_eq!(back[0], records[0]);
        assert_eq!(back[1].state[0], f64::INFINITY);
    }

    #[test]
    fn bad_line_is_located() {
        let input = "{\"time_s\":0.0,\"state\":[1.0]}\n\n{\"time_s\":0.1,\"state\":[null]}\n";
        match read_records(input.as_bytes()) {
            Err(ResultsError::BadRecord { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected BadRecord, got {other:?}"),
        }
    }
}
