use mockall::mock;
use serde_json::Value;
use tutorboard_core::errors::ScheduleResult;
use uuid::Uuid;

use crate::{RecordStore, SnapshotFn};

// Mock store for consumer tests
mock! {
    pub Store {}

    impl RecordStore for Store {
        fn create_record(&self, collection: &str, data: Value) -> ScheduleResult<Uuid>;

        fn update_field(
            &self,
            collection: &str,
            id: Uuid,
            field_path: &str,
            value: Value,
        ) -> ScheduleResult<()>;

        fn delete_record(&self, collection: &str, id: Uuid) -> ScheduleResult<()>;

        fn subscribe(&self, collection: &str, on_change: SnapshotFn) -> ScheduleResult<()>;
    }
}
