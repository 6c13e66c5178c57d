use vibescout::session::transcript::Transcript;
use vibescout::types::{ChatMessage, Role};

#[test]
fn first_message_is_the_persona_system_message() {
    let transcript = Transcript::new("persona text");
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript.persona().role, Role::System);
    assert_eq!(transcript.persona().content, "persona text");
}

#[test]
fn push_appends_after_the_persona() {
    let mut transcript = Transcript::new("persona");
    transcript.push(ChatMessage::user("hi"));
    transcript.push(ChatMessage::assistant("hello"));

    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript.persona().content, "persona");
    assert_eq!(transcript.messages()[2].role, Role::Assistant);
}

#[test]
fn augment_then_rollback_removes_exactly_the_transients() {
    let mut transcript = Transcript::new("persona");
    transcript.push(ChatMessage::user("hi"));

    let watermark = transcript.augment([
        ChatMessage::system("reminder one"),
        ChatMessage::system("reminder two"),
    ]);
    assert_eq!(transcript.len(), 4);

    transcript.rollback(watermark);
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript.messages()[1].content, "hi");
}

#[test]
fn rollback_never_drops_the_persona() {
    let mut transcript = Transcript::new("persona");
    transcript.push(ChatMessage::user("hi"));

    transcript.rollback(0);
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript.persona().role, Role::System);
}

#[test]
fn snapshot_without_last_drops_only_the_newest_entry() {
    let mut transcript = Transcript::new("persona");
    transcript.push(ChatMessage::user("first"));
    transcript.push(ChatMessage::user("second"));

    let snapshot = transcript.snapshot_without_last();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[1].content, "first");
    // The original transcript is untouched.
    assert_eq!(transcript.len(), 3);
}

#[test]
fn snapshot_of_bare_persona_keeps_the_persona() {
    let transcript = Transcript::new("persona");
    let snapshot = transcript.snapshot_without_last();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].role, Role::System);
}

#[test]
fn count_role_counts_by_role() {
    let mut transcript = Transcript::new("persona");
    transcript.push(ChatMessage::user("a"));
    transcript.push(ChatMessage::assistant("b"));
    transcript.push(ChatMessage::user("c"));

    assert_eq!(transcript.count_role(Role::System), 1);
    assert_eq!(transcript.count_role(Role::User), 2);
    assert_eq!(transcript.count_role(Role::Assistant), 1);
}
