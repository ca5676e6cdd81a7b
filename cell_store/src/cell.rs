use crate::{
    record::{AnyQuery, Record},
    schema::{Column, ColumnKind, Index, Storage, Table},
    RadioType, Result,
};
use sqlx::{any::AnyRow, Row};

pub const TABLE: Table = Table {
    name: "cell",
    columns: &[
        Column::primary_key("id"),
        // lat/lon * coordinate::FACTOR
        Column::new("lat", ColumnKind::Integer),
        Column::new("lon", ColumnKind::Integer),
        Column::new("radio", ColumnKind::SmallInt),
        // 0-999
        Column::new("mcc", ColumnKind::SmallInt),
        // 0-999 for gsm, 0-32767 for the cdma system id
        Column::new("mnc", ColumnKind::Integer),
        Column::new("lac", ColumnKind::Integer),
        Column::new("cid", ColumnKind::Integer),
        Column::new("psc", ColumnKind::Integer),
        Column::new("range", ColumnKind::Integer),
    ],
    indexes: &[Index {
        name: "cell_idx",
        columns: &["radio", "mcc", "mnc", "lac", "cid"],
        unique: false,
    }],
    storage: Storage::TRANSACTIONAL,
};

/// An observed cell tower or sector. `(radio, mcc, mnc, lac, cid)` identifies
/// the cell but is not unique in storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    pub id: Option<i64>,
    pub lat: Option<i32>,
    pub lon: Option<i32>,
    pub radio: Option<RadioType>,
    pub mcc: Option<i16>,
    pub mnc: Option<i32>,
    pub lac: Option<i32>,
    pub cid: Option<i32>,
    pub psc: Option<i32>,
    pub range: Option<i32>,
}

impl Record for Cell {
    const TABLE: Table = TABLE;

    fn bind<'q>(&self, query: AnyQuery<'q>) -> AnyQuery<'q> {
        query
            .bind(self.lat)
            .bind(self.lon)
            .bind(self.radio.map(RadioType::code))
            .bind(self.mcc)
            .bind(self.mnc)
            .bind(self.lac)
            .bind(self.cid)
            .bind(self.psc)
            .bind(self.range)
    }

    fn from_row(row: &AnyRow) -> Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            lat: row.try_get("lat")?,
            lon: row.try_get("lon")?,
            radio: row
                .try_get::<Option<i16>, _>("radio")?
                .map(RadioType::from_code)
                .transpose()?,
            mcc: row.try_get("mcc")?,
            mnc: row.try_get("mnc")?,
            lac: row.try_get("lac")?,
            cid: row.try_get("cid")?,
            psc: row.try_get("psc")?,
            range: row.try_get("range")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_index_is_not_unique() {
        let index = &TABLE.indexes[0];
        assert_eq!(index.name, "cell_idx");
        assert_eq!(index.columns, ["radio", "mcc", "mnc", "lac", "cid"]);
        assert!(!index.unique);
    }

    #[test]
    fn every_column_but_id_is_nullable() {
        assert_eq!(TABLE.primary_key().map(|column| column.name), Some("id"));
        assert!(!TABLE.primary_key().unwrap().auto_increment);
        assert_eq!(TABLE.insertable_columns().count(), 9);
        assert!(TABLE.insertable_columns().all(Column::nullable));
    }

    #[test]
    fn no_row_compression() {
        assert_eq!(TABLE.storage.row_format, None);
        assert_eq!(TABLE.storage.engine, "InnoDB");
        assert_eq!(TABLE.storage.charset, "utf8");
    }
}
