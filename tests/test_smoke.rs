//! Smoke test: the facade surface works end to end with the parser,
//! store, and evaluator wired together.

mod common;

use rlv::{parse_message, Behavior, ObjectId, RestrictionRecord};

use common::test_session;

#[test]
fn parser_surface_is_reexported() {
    let commands = parse_message("@tploc=n,attachall:Clothing=force");
    assert_eq!(commands.len(), 2);
    assert_eq!(Behavior::parse(&commands[0].behavior), Some(Behavior::TpLoc));
    assert_eq!(Behavior::parse(&commands[1].behavior), Some(Behavior::AttachAll));
}

#[tokio::test]
async fn lock_then_query_then_release() {
    let (session, _) = test_session(None);
    let obj = ObjectId::random();

    assert!(session.permissions().can_send_im());
    assert!(session.process_message("@sendim=n", obj, "collar").await);
    assert!(!session.permissions().can_send_im());

    let records = session.restrictions().find_restrictions();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].behavior, "sendim");
    assert_eq!(records[0].sender, obj);

    assert!(session.process_message("@sendim=y", obj, "collar").await);
    assert!(session.permissions().can_send_im());
}

#[tokio::test]
async fn restriction_snapshot_roundtrips_through_json() {
    let (session, _) = test_session(None);
    let obj = ObjectId::random();
    assert!(session.process_message("@tploc=n,fly=n", obj, "collar").await);

    let records = session.restrictions().find_restrictions();
    let json = serde_json::to_string(&records).unwrap();
    let back: Vec<RestrictionRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, records);
}
