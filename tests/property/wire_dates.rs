//! Property tests for the date/time wire codecs.
//!
//! 1. Any calendar date survives a trip through the task JSON unchanged.
//! 2. Any minute-precision time survives the same trip.
//! 3. Arbitrary strings never panic the date parser.

use chrono::{NaiveDate, NaiveTime};
use proptest::prelude::*;
use todolist_proto::task::{Task, TaskId};
use todolist_proto::wire;

/// Strategy for dates across a wide range of years.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (1i32..=9999, 1u32..=366).prop_filter_map("valid ordinal", |(year, ordinal)| {
        NaiveDate::from_yo_opt(year, ordinal)
    })
}

/// Strategy for times with minute precision (the wire format drops seconds).
fn arb_time() -> impl Strategy<Value = NaiveTime> {
    (0u32..24, 0u32..60).prop_filter_map("valid time", |(h, m)| NaiveTime::from_hms_opt(h, m, 0))
}

proptest! {
    #[test]
    fn due_date_round_trips_through_task_json(date in arb_date()) {
        let mut task = Task::new(TaskId::new("p"), "dated");
        task.due_date = Some(date);
        let json = serde_json::to_string(&task).unwrap();
        let decoded: Task = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(decoded.due_date, Some(date));
    }

    #[test]
    fn wire_date_string_round_trips(date in arb_date()) {
        prop_assert_eq!(wire::parse_date(&wire::format_date(date)).unwrap(), date);
    }

    #[test]
    fn due_time_round_trips_through_task_json(time in arb_time()) {
        let mut task = Task::new(TaskId::new("p"), "timed");
        task.due_time = Some(time);
        let json = serde_json::to_string(&task).unwrap();
        let decoded: Task = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(decoded.due_time, Some(time));
    }

    #[test]
    fn parse_date_never_panics(raw in ".*") {
        let _ = wire::parse_date(&raw);
    }
}
