use gatepass_core::db::open_db_in_memory;
use gatepass_core::{
    Attendee, AttendanceRepository, AttendeeRepository, EnrollmentRepository, NewAttendee,
    RepoError, Session, SqliteAttendanceRepository, SqliteAttendeeRepository,
    SqliteEnrollmentRepository,
};
use rusqlite::Connection;
use uuid::Uuid;

fn insert_alice(conn: &Connection) -> Attendee {
    let repo = SqliteAttendeeRepository::try_new(conn).unwrap();
    let attendee = Attendee::create(&NewAttendee::new("Alice Tan", "alice@x.edu", "MIT", 21));
    repo.insert_attendee(&attendee).unwrap();
    attendee
}

#[test]
fn attendee_roundtrip_and_email_lookup() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAttendeeRepository::try_new(&conn).unwrap();
    let alice = insert_alice(&conn);

    assert_eq!(repo.find_id_by_email("alice@x.edu").unwrap(), Some(alice.id));
    assert_eq!(repo.find_id_by_email("bob@x.edu").unwrap(), None);
    assert_eq!(repo.get_attendee(alice.id).unwrap(), Some(alice));
    assert_eq!(repo.get_attendee(Uuid::new_v4()).unwrap(), None);
}

#[test]
fn duplicate_email_insert_is_a_conflict_and_keeps_first_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAttendeeRepository::try_new(&conn).unwrap();
    let alice = insert_alice(&conn);

    let impostor = Attendee::create(&NewAttendee::new("Alicia", "alice@x.edu", "Harvard", 30));
    let err = repo.insert_attendee(&impostor).unwrap_err();
    assert!(matches!(err, RepoError::Conflict("attendees")));

    let stored = repo.get_attendee(alice.id).unwrap().unwrap();
    assert_eq!(stored.fullname, "Alice Tan");
    assert_eq!(repo.get_attendee(impostor.id).unwrap(), None);
}

#[test]
fn duplicate_enrollment_is_a_conflict_with_one_row() {
    let conn = open_db_in_memory().unwrap();
    let alice = insert_alice(&conn);
    let repo = SqliteEnrollmentRepository::try_new(&conn).unwrap();

    repo.insert_enrollment(alice.id, Session::Friday).unwrap();
    let err = repo.insert_enrollment(alice.id, Session::Friday).unwrap_err();
    assert!(matches!(err, RepoError::Conflict("enrollments")));

    let rows: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM enrollments WHERE attendee_id = ?1;",
            [alice.id.to_string()],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn enrollment_for_unknown_attendee_is_missing_parent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEnrollmentRepository::try_new(&conn).unwrap();

    let err = repo
        .insert_enrollment(Uuid::new_v4(), Session::Friday)
        .unwrap_err();
    assert!(matches!(err, RepoError::MissingParent("enrollments")));
}

#[test]
fn list_sessions_returns_calendar_order() {
    let conn = open_db_in_memory().unwrap();
    let alice = insert_alice(&conn);
    let repo = SqliteEnrollmentRepository::try_new(&conn).unwrap();

    repo.insert_enrollment(alice.id, Session::Sunday).unwrap();
    repo.insert_enrollment(alice.id, Session::Friday).unwrap();

    assert_eq!(
        repo.list_sessions(alice.id).unwrap(),
        vec![Session::Friday, Session::Sunday]
    );
    assert!(repo.enrollment_exists(alice.id, Session::Sunday).unwrap());
    assert!(!repo.enrollment_exists(alice.id, Session::Saturday).unwrap());
}

#[test]
fn attendance_without_enrollment_is_rejected_by_schema() {
    let conn = open_db_in_memory().unwrap();
    let alice = insert_alice(&conn);
    let repo = SqliteAttendanceRepository::try_new(&conn).unwrap();

    let err = repo
        .insert_attendance(alice.id, Session::Friday)
        .unwrap_err();
    assert!(matches!(err, RepoError::MissingParent("attendance")));
    assert!(!repo.attendance_exists(alice.id, Session::Friday).unwrap());
}

#[test]
fn attendance_rows_are_unique_and_deletable() {
    let conn = open_db_in_memory().unwrap();
    let alice = insert_alice(&conn);
    SqliteEnrollmentRepository::try_new(&conn)
        .unwrap()
        .insert_enrollment(alice.id, Session::Friday)
        .unwrap();
    let repo = SqliteAttendanceRepository::try_new(&conn).unwrap();

    repo.insert_attendance(alice.id, Session::Friday).unwrap();
    let err = repo
        .insert_attendance(alice.id, Session::Friday)
        .unwrap_err();
    assert!(matches!(err, RepoError::Conflict("attendance")));
    assert_eq!(repo.list_present(Session::Friday).unwrap(), vec![alice.id]);

    assert!(repo.delete_attendance(alice.id, Session::Friday).unwrap());
    assert!(!repo.delete_attendance(alice.id, Session::Friday).unwrap());
    assert!(repo.list_present(Session::Friday).unwrap().is_empty());
}

#[test]
fn repositories_refuse_unmigrated_connections() {
    let conn = Connection::open_in_memory().unwrap();

    let err = SqliteAttendeeRepository::try_new(&conn).err().unwrap();
    assert!(matches!(
        err,
        RepoError::UninitializedConnection {
            actual_version: 0,
            ..
        }
    ));
    assert!(SqliteEnrollmentRepository::try_new(&conn).is_err());
    assert!(SqliteAttendanceRepository::try_new(&conn).is_err());
}
