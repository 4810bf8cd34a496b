use std::sync::Arc;

use mockall::Sequence;
use pretty_assertions::assert_eq;
use serde_json::json;
use tutorboard_core::models::slot::Student;
use tutorboard_core::timezone::TimezoneCode;
use tutorboard_scheduler::{Board, SLOTS, TEACHERS};
use tutorboard_store::mock::MockStore;
use tutorboard_store::{RecordStore, Snapshot};
use uuid::Uuid;

fn teacher_record() -> serde_json::Value {
    json!({
        "name": "Dr. Evelyn Reed",
        "subject": "Quantum Physics",
        "timezone": "EST",
    })
}

fn slot_record(teacher_id: Uuid) -> serde_json::Value {
    json!({
        "teacher_id": teacher_id,
        "utc_start_time": "2024-07-15T13:00:00.000Z",
    })
}

/// Wire `subscribe` so the board is primed with the given snapshots.
fn expect_priming(mock: &mut MockStore, teachers: Snapshot, slots: Snapshot) {
    mock.expect_subscribe()
        .times(2)
        .returning(move |collection, on_change| {
            if collection == TEACHERS {
                on_change(&teachers);
            } else {
                on_change(&slots);
            }
            Ok(())
        });
}

#[test]
fn test_delete_issues_teacher_then_slot_deletions() {
    let teacher_id = Uuid::new_v4();
    let slot_a = Uuid::new_v4();
    let slot_b = Uuid::new_v4();

    let teachers = Snapshot::from([(teacher_id, teacher_record())]);
    let slots = Snapshot::from([
        (slot_a, slot_record(teacher_id)),
        (slot_b, slot_record(teacher_id)),
    ]);

    let mut mock = MockStore::new();
    expect_priming(&mut mock, teachers, slots);

    let mut seq = Sequence::new();
    mock.expect_delete_record()
        .withf(move |collection, id| collection == TEACHERS && *id == teacher_id)
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(()));
    mock.expect_delete_record()
        .withf(move |collection, id| collection == SLOTS && (*id == slot_a || *id == slot_b))
        .times(2)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(()));

    let board = Board::attach(Arc::new(mock) as Arc<dyn RecordStore>).unwrap();
    board.delete_teacher(teacher_id).unwrap();
}

#[test]
fn test_unknown_ids_touch_no_records() {
    let mut mock = MockStore::new();
    expect_priming(&mut mock, Snapshot::new(), Snapshot::new());
    // No create/update/delete expectations: any store write would panic.

    let board = Board::attach(Arc::new(mock) as Arc<dyn RecordStore>).unwrap();

    board.delete_teacher(Uuid::new_v4()).unwrap();
    board
        .assign_student(
            Uuid::new_v4(),
            Student {
                name: "Alex".to_string(),
                timezone: TimezoneCode::Ist,
            },
        )
        .unwrap();
    board.clear_student(Uuid::new_v4()).unwrap();
}

#[test]
fn test_assign_updates_only_the_student_field() {
    let slot_id = Uuid::new_v4();
    let slots = Snapshot::from([(slot_id, slot_record(Uuid::new_v4()))]);

    let mut mock = MockStore::new();
    expect_priming(&mut mock, Snapshot::new(), slots);
    mock.expect_update_field()
        .withf(move |collection, id, field_path, value| {
            collection == SLOTS
                && *id == slot_id
                && field_path == "student"
                && value["name"] == "Alex"
        })
        .times(1)
        .returning(|_, _, _, _| Ok(()));

    let board = Board::attach(Arc::new(mock) as Arc<dyn RecordStore>).unwrap();
    board
        .assign_student(
            slot_id,
            Student {
                name: "Alex".to_string(),
                timezone: TimezoneCode::Ist,
            },
        )
        .unwrap();
}

#[test]
fn test_add_teacher_writes_teacher_before_slots() {
    let teacher_id = Uuid::new_v4();

    let mut mock = MockStore::new();
    expect_priming(&mut mock, Snapshot::new(), Snapshot::new());

    let mut seq = Sequence::new();
    mock.expect_create_record()
        .withf(|collection, data| collection == TEACHERS && data["name"] == "Dr. Evelyn Reed")
        .times(1)
        .in_sequence(&mut seq)
        .returning(move |_, _| Ok(teacher_id));
    mock.expect_create_record()
        .withf(move |collection, data| {
            collection == SLOTS
                && data["teacher_id"] == json!(teacher_id)
                && data["utc_start_time"].is_string()
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(Uuid::new_v4()));

    let board = Board::attach(Arc::new(mock) as Arc<dyn RecordStore>).unwrap();

    let (teacher, slots) = board
        .add_teacher(tutorboard_core::models::teacher::CreateTeacherRequest {
            name: "Dr. Evelyn Reed".to_string(),
            subject: "Quantum Physics".to_string(),
            timezone: TimezoneCode::Est,
            slots: vec![tutorboard_core::models::slot::SlotSpec {
                day_of_week: chrono::Weekday::Mon,
                time: "09:00".to_string(),
                timezone: TimezoneCode::Est,
            }],
        })
        .unwrap();

    assert_eq!(teacher.id, teacher_id);
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].teacher_id, teacher_id);
}
