use geometry_core::db::open_db_in_memory;
use geometry_core::{
    CalculationRepository, CalculationService, NewCalculation, Rectangle, ShapeKind,
    SqliteCalculationRepository, Trapezoid, Triangle,
};

fn rectangle_record() -> NewCalculation {
    NewCalculation::from_shape(&Rectangle::new(3.0, 4.0).unwrap())
}

#[test]
fn save_then_list_recent_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCalculationRepository::try_new(&conn).unwrap();

    let record = NewCalculation::from_shape(&Trapezoid::new(5.0, 7.0, 4.0).unwrap());
    let id = repo.save(&record).unwrap();

    let loaded = repo.list_recent(1).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, id);
    assert!(loaded[0].created_at > 0);
    assert_eq!(loaded[0].to_new_calculation(), record);
}

#[test]
fn ids_and_timestamps_are_monotonic() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCalculationRepository::try_new(&conn).unwrap();

    let mut saved = Vec::new();
    for _ in 0..5 {
        let id = repo.save(&rectangle_record()).unwrap();
        saved.push(repo.get(id).unwrap().unwrap());
    }

    for pair in saved.windows(2) {
        assert!(pair[1].id > pair[0].id);
        assert!(pair[1].created_at >= pair[0].created_at);
    }
}

#[test]
fn list_recent_is_newest_first_and_bounded() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCalculationRepository::try_new(&conn).unwrap();

    let first = repo.save(&rectangle_record()).unwrap();
    let second = repo
        .save(&NewCalculation::from_shape(&Triangle::new(3.0, 4.0, 5.0).unwrap()))
        .unwrap();
    let third = repo.save(&rectangle_record()).unwrap();

    let ids: Vec<i64> = repo
        .list_recent(10)
        .unwrap()
        .into_iter()
        .map(|record| record.id)
        .collect();
    assert_eq!(ids, vec![third, second, first]);

    assert_eq!(repo.list_recent(2).unwrap().len(), 2);
    assert!(repo.list_recent(0).unwrap().is_empty());
}

#[test]
fn list_by_shape_filters_by_discriminator() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCalculationRepository::try_new(&conn).unwrap();

    repo.save(&rectangle_record()).unwrap();
    let triangle_id = repo
        .save(&NewCalculation::from_shape(&Triangle::new(5.0, 5.0, 5.0).unwrap()))
        .unwrap();
    repo.save(&rectangle_record()).unwrap();

    let triangles = repo.list_by_shape(ShapeKind::Triangle, 10).unwrap();
    assert_eq!(triangles.len(), 1);
    assert_eq!(triangles[0].id, triangle_id);
    assert_eq!(triangles[0].shape_type, ShapeKind::Triangle);

    assert_eq!(repo.list_by_shape(ShapeKind::Rectangle, 10).unwrap().len(), 2);
    assert_eq!(repo.list_by_shape(ShapeKind::Rectangle, 1).unwrap().len(), 1);
    assert!(repo.list_by_shape(ShapeKind::Trapezoid, 10).unwrap().is_empty());
}

#[test]
fn absent_radii_stay_absent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCalculationRepository::try_new(&conn).unwrap();

    let id = repo.save(&rectangle_record()).unwrap();
    let loaded = repo.get(id).unwrap().unwrap();

    assert_eq!(loaded.circumscribed_radius, Some(2.5));
    assert_eq!(loaded.inscribed_radius, None);
    assert!(repo.get(id + 100).unwrap().is_none());
}

#[test]
fn clear_all_requires_confirmation() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCalculationRepository::try_new(&conn).unwrap();

    for _ in 0..3 {
        repo.save(&rectangle_record()).unwrap();
    }

    assert_eq!(repo.clear_all(false).unwrap(), 0);
    assert_eq!(repo.list_recent(10).unwrap().len(), 3);

    assert_eq!(repo.clear_all(true).unwrap(), 3);
    assert!(repo.list_recent(10).unwrap().is_empty());
    assert_eq!(repo.statistics().unwrap().total, 0);

    assert_eq!(repo.clear_all(true).unwrap(), 0);
}

#[test]
fn statistics_aggregates_per_shape() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCalculationRepository::try_new(&conn).unwrap();

    repo.save(&rectangle_record()).unwrap();
    repo.save(&NewCalculation::from_shape(&Rectangle::new(2.0, 2.0).unwrap()))
        .unwrap();
    let last_id = repo
        .save(&NewCalculation::from_shape(&Triangle::new(3.0, 4.0, 5.0).unwrap()))
        .unwrap();

    let stats = repo.statistics().unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.by_shape.iter().map(|entry| entry.count).sum::<u64>(), 3);

    let rectangles = &stats.by_shape[0];
    assert_eq!(rectangles.shape_type, ShapeKind::Rectangle);
    assert_eq!(rectangles.count, 2);
    assert_eq!(rectangles.avg_area, 8.0);
    assert_eq!(rectangles.min_area, 4.0);
    assert_eq!(rectangles.max_area, 12.0);

    let triangles = &stats.by_shape[1];
    assert_eq!(triangles.shape_type, ShapeKind::Triangle);
    assert_eq!(triangles.count, 1);
    assert_eq!(triangles.avg_area, 6.0);

    let last = repo.get(last_id).unwrap().unwrap();
    assert_eq!(stats.last_created_at, Some(last.created_at));
}

#[test]
fn statistics_on_empty_store() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCalculationRepository::try_new(&conn).unwrap();

    let stats = repo.statistics().unwrap();
    assert_eq!(stats.total, 0);
    assert!(stats.by_shape.is_empty());
    assert_eq!(stats.last_created_at, None);
}

#[test]
fn service_wraps_repository_calls() {
    let conn = open_db_in_memory().unwrap();
    let service = CalculationService::new(SqliteCalculationRepository::try_new(&conn).unwrap());

    let rectangle = service.calculate_rectangle(4.0, 4.0).unwrap();
    let trapezoid = service.calculate_trapezoid(5.0, 7.0, 4.0).unwrap();
    assert!(trapezoid.id > rectangle.id);
    assert_eq!(rectangle.snapshot().inscribed_radius, Some(2.0));

    let history = service.history(None, 10).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].shape_type, ShapeKind::Trapezoid);
    assert_eq!(history[0].parameters, "5,7, h=4");

    assert_eq!(service.statistics().unwrap().total, 2);
    assert_eq!(service.clear_history(false).unwrap(), 0);
    assert_eq!(service.clear_history(true).unwrap(), 2);
}

#[test]
fn store_failure_is_reported_as_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.db");
    let conn = geometry_core::db::open_db(&path).unwrap();
    conn.execute_batch("DROP TABLE calculations;").unwrap();

    let service = CalculationService::new(SqliteCalculationRepository::new(&conn));
    let err = service.calculate_rectangle(1.0, 2.0).unwrap_err();
    assert!(err.is_storage());
    assert!(err.to_string().contains("unavailable"));
}
