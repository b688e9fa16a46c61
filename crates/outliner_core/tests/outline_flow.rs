use outliner_core::{
    render_outline, ListArrangement, OutlinerSession, ProjectError, SessionError,
};

fn session_with_raw(raw: &str) -> (OutlinerSession, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("raw.txt");
    std::fs::write(&path, raw).unwrap();

    let mut session = OutlinerSession::new();
    session.new_project_from_file(&path).unwrap();
    (session, dir)
}

#[test]
fn import_assign_export_scenario() {
    let (mut session, dir) = session_with_raw("alpha\nbeta\n\ngamma");
    let queue: Vec<&str> = session.project().notes().iter().map(String::as_str).collect();
    assert_eq!(queue, ["alpha", "beta", "gamma"]);

    session.new_topic("Intro").unwrap();
    session.assign_current_note("Intro").unwrap();
    assert_eq!(session.view_topic("Intro").unwrap().notes(), ["alpha"]);
    let queue: Vec<&str> = session.project().notes().iter().map(String::as_str).collect();
    assert_eq!(queue, ["beta", "gamma"]);

    let out = dir.path().join("outline.txt");
    let arrangement = ListArrangement::from_project(session.project());
    session.export(&arrangement, &out).unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    assert_eq!(text, "Intro:\n\talpha\n\n\n");
}

#[test]
fn export_follows_committed_topic_order() {
    let (mut session, dir) = session_with_raw("a\nb\nc");
    for name in ["A", "B", "C"] {
        session.new_topic(name).unwrap();
        session.assign_current_note(name).unwrap();
    }

    let mut arrangement = ListArrangement::from_project(session.project());
    arrangement.move_topic("B", 0).unwrap();
    let out = dir.path().join("outline.txt");
    session.export(&arrangement, &out).unwrap();

    assert_eq!(session.project().topic("B").unwrap().number(), 0);
    assert_eq!(session.project().topic("A").unwrap().number(), 1);
    assert_eq!(session.project().topic("C").unwrap().number(), 2);
    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        "B:\n\tb\n\n\nA:\n\ta\n\n\nC:\n\tc\n\n\n"
    );
}

#[test]
fn note_moves_in_arrangement_reach_the_model() {
    let (mut session, _dir) = session_with_raw("first\nsecond\nthird");
    session.new_topic("T").unwrap();
    for _ in 0..3 {
        session.assign_current_note("T").unwrap();
    }

    let mut arrangement = ListArrangement::from_project(session.project());
    arrangement.move_note("T", 0, 2).unwrap();
    session.commit_order(&arrangement).unwrap();

    assert_eq!(
        session.view_topic("T").unwrap().notes(),
        ["second", "third", "first"]
    );
    assert_eq!(
        render_outline(session.project()),
        "T:\n\tsecond\n\n\tthird\n\n\tfirst\n\n\n"
    );
}

#[test]
fn duplicate_topic_is_signalled_and_retry_succeeds() {
    let mut session = OutlinerSession::new();
    session.new_topic("A").unwrap();

    let err = session.new_topic("A").unwrap_err();
    assert!(matches!(
        err,
        SessionError::Project(ProjectError::DuplicateTopic(name)) if name == "A"
    ));
    assert_eq!(session.project().topic_count(), 1);

    session.new_topic("A2").unwrap();
    assert_eq!(session.project().topic_count(), 2);
}

#[test]
fn assignment_conserves_total_note_count() {
    let (mut session, _dir) = session_with_raw("1\n2\n3\n4");
    session.new_topic("X").unwrap();
    session.new_topic("Y").unwrap();
    let total = session.project().total_note_count();

    for target in ["X", "Y", "X", "Y", "X"] {
        session.assign_current_note(target).unwrap();
        assert_eq!(session.project().total_note_count(), total);
    }
    assert!(session.current_note().is_none());
}
