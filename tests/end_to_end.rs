use prodtrack::application::App;
use prodtrack::domain::{LogRow, Status, Theme};
use prodtrack::infrastructure::{RowStore, XlsxStore};

fn launch(path: &std::path::Path) -> App {
    App::bootstrap(Box::new(XlsxStore::new(path)), Theme::Dark).unwrap()
}

fn fill_and_submit(app: &mut App, date: &str, task: &str, hours: &str, status: Status) -> bool {
    app.form.date.set_value(date);
    app.form.task.set_value(task);
    app.form.hours.set_value(hours);
    app.form.status = status;
    app.submit()
}

#[test]
fn fresh_directory_gets_header_only_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("productivity_log.xlsx");
    assert!(!path.exists());

    let app = launch(&path);

    assert!(path.exists());
    assert!(app.rows.is_empty());
    assert!(XlsxStore::new(&path).read_all_rows().unwrap().is_empty());
}

#[test]
fn submit_and_relaunch_shows_the_same_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("productivity_log.xlsx");

    let mut app = launch(&path);
    assert!(fill_and_submit(&mut app, "2024-01-01", "Write report", "3", Status::Completed));

    let expected = vec![LogRow::new("2024-01-01", "Write report", 3, Status::Completed)];
    assert_eq!(app.rows, expected);
    assert_eq!(XlsxStore::new(&path).read_all_rows().unwrap(), expected);
    drop(app);

    let relaunched = launch(&path);
    assert_eq!(relaunched.rows, expected);
}

#[test]
fn rows_survive_restarts_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("productivity_log.xlsx");

    let mut first = launch(&path);
    assert!(fill_and_submit(&mut first, "2024-02-01", "Plan sprint", "2", Status::Pending));
    assert!(fill_and_submit(&mut first, "2024-02-01", "Code review", "5", Status::InProgress));
    drop(first);

    let mut second = launch(&path);
    assert_eq!(second.rows.len(), 2);
    assert!(fill_and_submit(&mut second, "2024-02-02", "Ship it", "24", Status::Completed));
    let written = second.rows.clone();
    drop(second);

    let third = launch(&path);
    assert_eq!(third.rows, written);
    assert_eq!(third.rows[0].task, "Plan sprint");
    assert_eq!(third.rows[2].hours_spent, 24);
}

#[test]
fn rejected_hours_touch_neither_table_nor_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("productivity_log.xlsx");

    let mut app = launch(&path);
    assert!(fill_and_submit(&mut app, "2024-01-01", "Write report", "3", Status::Completed));
    assert!(!fill_and_submit(&mut app, "2024-01-02", "Broken", "abc", Status::Completed));

    assert_eq!(app.rows.len(), 1);
    assert_eq!(XlsxStore::new(&path).read_all_rows().unwrap().len(), 1);
}

#[test]
fn theme_toggle_leaves_data_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("productivity_log.xlsx");

    let mut app = launch(&path);
    assert!(fill_and_submit(&mut app, "2024-01-01", "Write report", "3", Status::Completed));
    let before = app.rows.clone();

    app.toggle_theme();
    app.toggle_theme();

    assert_eq!(app.theme, Theme::Dark);
    assert_eq!(app.rows, before);
    assert_eq!(XlsxStore::new(&path).read_all_rows().unwrap(), before);
}
