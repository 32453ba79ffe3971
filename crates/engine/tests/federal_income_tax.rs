mod common;

use api_types::tax::{FederalIncomeTax, MaritalStatus, PayPeriod};
use engine::{EngineError, Saved, tax::FederalIncomeTaxes};

use common::{engine_with_db, engine_with_file_db};

fn bracket(over: f64, not_over: Option<f64>) -> FederalIncomeTax {
    FederalIncomeTax {
        id: None,
        year: 2020,
        marital_status: MaritalStatus::Single,
        pay_period: PayPeriod::Weekly,
        over,
        not_over,
        plus: 0.0,
        percent: 10.0,
        non_taxable: 0.0,
        date_created: 0,
        date_updated: 0,
    }
}

#[tokio::test]
async fn overlapping_brackets_are_rejected() {
    let (engine, _db) = engine_with_db().await;
    let service = engine.service::<FederalIncomeTaxes>();

    let stored = service.add(bracket(1.0, Some(5.0)), "").await.unwrap();
    let id = stored.id.unwrap();

    for (over, not_over) in [
        (2.0, None),
        (0.0, Some(2.0)),
        (2.0, Some(10.0)),
        (1.0, Some(5.0)),
        (0.5, Some(7.0)),
    ] {
        let err = service
            .add(bracket(over, not_over), "")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::ExistingKey(format!("federalIncomeTax {id}")),
            "range {over}..{not_over:?} should overlap"
        );
    }
}

#[tokio::test]
async fn adjacent_brackets_and_other_groups_are_accepted() {
    let (engine, _db) = engine_with_db().await;
    let service = engine.service::<FederalIncomeTaxes>();

    service.add(bracket(1.0, Some(5.0)), "").await.unwrap();
    service.add(bracket(5.0, Some(9.0)), "").await.unwrap();
    service.add(bracket(9.0, None), "").await.unwrap();

    let mut married = bracket(1.0, Some(5.0));
    married.marital_status = MaritalStatus::Married;
    service.add(married, "").await.unwrap();

    let mut next_year = bracket(1.0, Some(5.0));
    next_year.year = 2021;
    service.add(next_year, "").await.unwrap();

    assert_eq!(service.get_all("").await.unwrap().len(), 5);
}

#[tokio::test]
async fn update_ignores_its_own_range_but_not_neighbours() {
    let (engine, _db) = engine_with_db().await;
    let service = engine.service::<FederalIncomeTaxes>();

    let low = service.add(bracket(1.0, Some(5.0)), "").await.unwrap();
    service.add(bracket(5.0, Some(9.0)), "").await.unwrap();

    let mut widened = low.clone();
    widened.over = 0.0;
    widened.percent = 12.0;
    let saved = service.update(widened, "").await.unwrap();
    let Saved::Updated(updated) = saved else {
        panic!("expected an update");
    };
    assert_eq!(updated.over, 0.0);
    assert_eq!(updated.date_created, low.date_created);
    assert!(updated.date_updated >= low.date_updated);

    let mut clobber = updated.clone();
    clobber.not_over = Some(6.0);
    assert!(matches!(
        service.update(clobber, "").await,
        Err(EngineError::ExistingKey(_))
    ));
}

#[tokio::test]
async fn invalid_fields_are_rejected_before_storage() {
    let (engine, _db) = engine_with_db().await;
    let service = engine.service::<FederalIncomeTaxes>();

    let mut bad = bracket(5.0, Some(1.0));
    assert!(matches!(
        service.add(bad.clone(), "").await,
        Err(EngineError::InvalidField(_))
    ));

    bad.not_over = None;
    bad.percent = 101.0;
    assert!(matches!(
        service.add(bad, "").await,
        Err(EngineError::InvalidField(_))
    ));
    assert!(service.get_all("").await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_overlapping_adds_store_one_bracket() {
    let (engine, _db) = engine_with_file_db().await;

    let writers: Vec<_> = (0..8_i32)
        .map(|i| {
            let service = engine.service::<FederalIncomeTaxes>();
            let over = f64::from(i) * 0.1;
            tokio::spawn(async move { service.add(bracket(over, Some(5.0)), "").await })
        })
        .collect();

    let mut accepted = 0;
    for writer in writers {
        match writer.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(err) => assert!(matches!(err, EngineError::ExistingKey(_)), "{err}"),
        }
    }

    assert_eq!(accepted, 1);
    let stored = engine
        .service::<FederalIncomeTaxes>()
        .get_all("")
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn brackets_are_read_and_deleted_by_year() {
    let (engine, _db) = engine_with_db().await;
    let service = engine.service::<FederalIncomeTaxes>();

    let first = service.add(bracket(1.0, Some(5.0)), "").await.unwrap();
    service.add(bracket(5.0, None), "").await.unwrap();
    let mut later = bracket(1.0, None);
    later.year = 2021;
    service.add(later, "").await.unwrap();

    assert_eq!(service.get_single(2020, "").await.unwrap(), first);

    service.delete(2020, "").await.unwrap();
    let left = service.get_all("").await.unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].year, 2021);
    assert_eq!(
        service.delete(2020, "").await.unwrap_err(),
        EngineError::KeyNotFound("federalIncomeTax 2020".to_string())
    );
}
