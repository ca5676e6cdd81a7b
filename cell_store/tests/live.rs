//! Runs against real servers when `DATABASE_URL` names a postgres database
//! and `MYSQL_DATABASE_URL` a mysql one. Each test is skipped when its
//! variable is unset. Rows are left behind, so assertions compare counts
//! before and after.

mod common;

use cell_store::{coordinate, Backend, Cell, Database, Measure, RadioType};
use chrono::{DateTime, Utc};

fn live_url(var: &str) -> Option<String> {
    common::init_tracing();
    let url = std::env::var(var).ok().filter(|url| !url.is_empty());
    if url.is_none() {
        eprintln!("{var} not set, skipping");
    }
    url
}

async fn exercise(url: &str, backend: Backend) -> anyhow::Result<()> {
    Database::connect(url).await?;
    let database = Database::connect(url).await?;
    assert_eq!(database.backend(), backend);

    let mut session = database.session().await?;
    let cells = common::count(&mut session, "cell").await?;
    let measures = common::count(&mut session, "measure").await?;
    session.close().await?;

    let cell = Cell {
        lat: coordinate::to_fixed(48.856_6),
        lon: coordinate::to_fixed(2.352_2),
        radio: Some(RadioType::Cdma),
        mcc: Some(208),
        mnc: Some(32_767),
        lac: Some(7),
        cid: Some(65_535),
        psc: None,
        range: Some(800),
        ..Default::default()
    };
    let time: DateTime<Utc> = "2014-03-01T08:00:00.250001Z".parse()?;
    let measure = Measure {
        lat: cell.lat,
        lon: cell.lon,
        time: Some(time),
        accuracy: Some(25),
        radio: Some(RadioType::Umts),
        cell: Some(br#"[{"mcc": 208}]"#.to_vec()),
        wifi: Some(vec![0, 255, 1]),
        ..Default::default()
    };

    let mut session = database.session().await?;
    let cell_id = session.add(&cell).await?;
    let measure_id = session.add(&measure).await?;
    session.commit().await?;

    let mut session = database.session().await?;
    let stored: Cell = session.get(cell_id).await?.expect("cell");
    assert_eq!(
        Cell {
            id: None,
            ..stored
        },
        cell
    );
    let stored: Measure = session.get(measure_id).await?.expect("measure");
    assert_eq!(
        Measure {
            id: None,
            ..stored
        },
        measure
    );

    session.add(&cell).await?;
    session.add(&measure).await?;
    drop(session);

    let mut session = database.session().await?;
    assert_eq!(common::count(&mut session, "cell").await?, cells + 1);
    assert_eq!(common::count(&mut session, "measure").await?, measures + 1);
    Ok(())
}

#[tokio::test]
async fn postgres_round_trip() -> anyhow::Result<()> {
    let Some(url) = live_url("DATABASE_URL") else {
        return Ok(());
    };
    exercise(&url, Backend::Postgres).await
}

#[tokio::test]
async fn mysql_round_trip() -> anyhow::Result<()> {
    let Some(url) = live_url("MYSQL_DATABASE_URL") else {
        return Ok(());
    };
    exercise(&url, Backend::MySql).await
}
