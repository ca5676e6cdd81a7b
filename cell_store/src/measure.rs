use crate::{
    record::{AnyQuery, Record},
    schema::{Column, ColumnKind, Storage, Table, TIMESTAMP_FORMAT},
    Error, RadioType, Result,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{any::AnyRow, Row};

pub const TABLE: Table = Table {
    name: "measure",
    columns: &[
        Column::primary_key("id").auto_increment(),
        // lat/lon * coordinate::FACTOR
        Column::new("lat", ColumnKind::Integer),
        Column::new("lon", ColumnKind::Integer),
        Column::new("time", ColumnKind::Timestamp),
        Column::new("accuracy", ColumnKind::Integer),
        Column::new("altitude", ColumnKind::Integer),
        Column::new("altitude_accuracy", ColumnKind::Integer),
        Column::new("radio", ColumnKind::SmallInt),
        // serialized observations, never interpreted here
        Column::new("cell", ColumnKind::Blob),
        Column::new("wifi", ColumnKind::Blob),
    ],
    indexes: &[],
    storage: Storage::TRANSACTIONAL.compressed(4),
};

/// A single location fix reported by a device together with whatever radio
/// environment it observed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Measure {
    pub id: Option<i64>,
    pub lat: Option<i32>,
    pub lon: Option<i32>,
    pub time: Option<DateTime<Utc>>,
    pub accuracy: Option<i32>,
    pub altitude: Option<i32>,
    pub altitude_accuracy: Option<i32>,
    pub radio: Option<RadioType>,
    pub cell: Option<Vec<u8>>,
    pub wifi: Option<Vec<u8>>,
}

impl Record for Measure {
    const TABLE: Table = TABLE;

    fn bind<'q>(&self, query: AnyQuery<'q>) -> AnyQuery<'q> {
        query
            .bind(self.lat)
            .bind(self.lon)
            .bind(self.time.map(|time| time.format(TIMESTAMP_FORMAT).to_string()))
            .bind(self.accuracy)
            .bind(self.altitude)
            .bind(self.altitude_accuracy)
            .bind(self.radio.map(RadioType::code))
            .bind(self.cell.clone())
            .bind(self.wifi.clone())
    }

    fn from_row(row: &AnyRow) -> Result<Self> {
        let time = row
            .try_get::<Option<String>, _>("time")?
            .map(|text| parse_time(&text))
            .transpose()?;

        Ok(Self {
            id: row.try_get("id")?,
            lat: row.try_get("lat")?,
            lon: row.try_get("lon")?,
            time,
            accuracy: row.try_get("accuracy")?,
            altitude: row.try_get("altitude")?,
            altitude_accuracy: row.try_get("altitude_accuracy")?,
            radio: row
                .try_get::<Option<i16>, _>("radio")?
                .map(RadioType::from_code)
                .transpose()?,
            cell: row.try_get("cell")?,
            wifi: row.try_get("wifi")?,
        })
    }
}

// fractional seconds are optional so rows written by other clients still read
fn parse_time(text: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f")
        .map(|time| time.and_utc())
        .map_err(|_| Error::InvalidTimestamp(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RowFormat;

    #[test]
    fn rows_are_compressed() {
        assert_eq!(TABLE.storage.row_format, Some(RowFormat::Compressed));
        assert_eq!(TABLE.storage.key_block_size, Some(4));
    }

    #[test]
    fn id_auto_increments() {
        let id = TABLE.primary_key().unwrap();
        assert_eq!(id.name, "id");
        assert!(id.auto_increment);
        assert!(TABLE.indexes.is_empty());
    }

    #[test]
    fn blob_columns() {
        for name in ["cell", "wifi"] {
            let column = TABLE.column(name).unwrap();
            assert_eq!(column.kind, ColumnKind::Blob);
            assert!(column.nullable());
        }
        assert_eq!(TABLE.column("time").unwrap().kind, ColumnKind::Timestamp);
    }

    #[test]
    fn stored_time_text() {
        let time: DateTime<Utc> = "2014-01-12T14:21:34.123456Z".parse().unwrap();
        let text = time.format(TIMESTAMP_FORMAT).to_string();
        assert_eq!(text, "2014-01-12 14:21:34.123456");
        assert_eq!(parse_time(&text).unwrap(), time);

        let whole: DateTime<Utc> = "2014-01-12T14:21:34Z".parse().unwrap();
        assert_eq!(parse_time("2014-01-12 14:21:34").unwrap(), whole);

        assert!(matches!(
            parse_time("yesterday"),
            Err(Error::InvalidTimestamp(text)) if text == "yesterday"
        ));
    }
}
