//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use base64::{engine::general_purpose, Engine as _};
use testlog_core::{MemoryStore, PermissionClass, Principal, ServiceConfig, TestLogService};

/// Factory validation report for part 860-00014 as sent by a sync client
/// (base64, CRLF line endings inside the XML).
pub const EXAMPLE_REPORT: &str = "PD94bWwgdmVyc2lvbj0iMS4wIiBlbmNvZGluZz0iVVRGLTgiPz4NCjx0ZXN0X3JlcG9ydD4NCiAgICA8dXV0cz4NCiAgICAgICAgPHV1dD4NCiAgICAgICAgICAgIDxzdW1tYXJ5Pg0KICAgICAgICAgICAgICAgIDxwYXJ0X251bWJlcj44NjAtMDAwMTQ8L3BhcnRfbnVtYmVyPg0KICAgICAgICAgICAgICAgIDxzZXJpYWxfbnVtYmVyPmU0YmY3Y2ViLWY3YWYtNDQyZS1iNzM0LTU0MzJlZjMzMDZiNTwvc2VyaWFsX251bWJlcj4NCiAgICAgICAgICAgICAgICA8b3BlcmF0aW9uPlZhbGlkYXRpb24gVGVzdDwvb3BlcmF0aW9uPg0KICAgICAgICAgICAgICAgIDxzdGFydGVkX2F0PjIwMTgtMDQtMDlUMTc6NDQ6MTYrMDI6MDA8L3N0YXJ0ZWRfYXQ+DQogICAgICAgICAgICAgICAgPGVuZGVkX2F0PjIwMTgtMDQtMDlUMTc6NDQ6MTYrMDI6MDA8L2VuZGVkX2F0Pg0KICAgICAgICAgICAgICAgIDxzdGF0dXM+RmFpbGVkPC9zdGF0dXM+DQogICAgICAgICAgICA8L3N1bW1hcnk+DQogICAgICAgICAgICA8dGVzdHM+DQogICAgICAgICAgICAgICAgPHRlc3Q+DQogICAgICAgICAgICAgICAgICAgIDxuYW1lPmZhY3RvcnlfY3B1L2lNWDZVTEw8L25hbWU+DQogICAgICAgICAgICAgICAgICAgIDxzdGF0dXM+ZmFpbGVkPC9zdGF0dXM+DQogICAgICAgICAgICAgICAgPC90ZXN0Pg0KICAgICAgICAgICAgICAgIDx0ZXN0Pg0KICAgICAgICAgICAgICAgICAgICA8bmFtZT5mYWN0b3J5X2V0aGVybmV0L2NhcmQtZGV0ZWN0PC9uYW1lPg0KICAgICAgICAgICAgICAgICAgICA8c3RhdHVzPmZhaWxlZDwvc3RhdHVzPg0KICAgICAgICAgICAgICAgIDwvdGVzdD4NCiAgICAgICAgICAgICAgICA8dGVzdD4NCiAgICAgICAgICAgICAgICAgICAgPG5hbWU+ZmFjdG9yeV9oZGQvZHJpdmUtY291bnQ8L25hbWU+DQogICAgICAgICAgICAgICAgICAgIDxzdGF0dXM+ZmFpbGVkPC9zdGF0dXM+DQogICAgICAgICAgICAgICAgPC90ZXN0Pg0KICAgICAgICAgICAgICAgIDx0ZXN0Pg0KICAgICAgICAgICAgICAgICAgICA8bmFtZT5mYWN0b3J5X1JBTS9zaXplPC9uYW1lPg0KICAgICAgICAgICAgICAgICAgICA8c3RhdHVzPnBhc3NlZDwvc3RhdHVzPg0KICAgICAgICAgICAgICAgIDwvdGVzdD4NCiAgICAgICAgICAgICAgICA8dGVzdD4NCiAgICAgICAgICAgICAgICAgICAgPG5hbWU+ZmFjdG9yeV9SVEM8L25hbWU+DQogICAgICAgICAgICAgICAgICAgIDxzdGF0dXM+ZmFpbGVkPC9zdGF0dXM+DQogICAgICAgICAgICAgICAgPC90ZXN0Pg0KICAgICAgICAgICAgICAgIDx0ZXN0Pg0KICAgICAgICAgICAgICAgICAgICA8bmFtZT5mYWN0b3J5X3VzYi91c2IyLXJvb3QtaHViLXByZXNlbnQ8L25hbWU+DQogICAgICAgICAgICAgICAgICAgIDxzdGF0dXM+cGFzc2VkPC9zdGF0dXM+DQogICAgICAgICAgICAgICAgPC90ZXN0Pg0KICAgICAgICAgICAgPC90ZXN0cz4NCjwvdXV0Pg0KPC91dXRzPg0KPC90ZXN0X3JlcG9ydD4=";

pub const EXAMPLE_MODEL: &str = "860-00014";
pub const EXAMPLE_SERIAL: &str = "e4bf7ceb-f7af-442e-b734-5432ef3306b5";

pub fn service() -> (TestLogService, MemoryStore) {
    let store = MemoryStore::new();
    let service = TestLogService::new(Arc::new(store.clone()), ServiceConfig::default());
    (service, store)
}

pub fn sync_user() -> Principal {
    Principal::new("sync", PermissionClass::Sync, [EXAMPLE_MODEL])
}

pub fn standard_user(models: &[&str]) -> Principal {
    Principal::new("user1", PermissionClass::Standard, models.iter().copied())
}

/// Minimal valid report document for one device.
pub fn report_xml(model: &str, serial: &str, tests: &[(&str, &str)]) -> String {
    let tests: String = tests
        .iter()
        .map(|(name, status)| {
            format!(
                "<test><name>{}</name><status>{}</status></test>",
                name, status
            )
        })
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<test_report><uuts><uut><summary>\
         <part_number>{}</part_number><serial_number>{}</serial_number>\
         <operation>Validation Test</operation>\
         <started_at>2018-04-09T17:44:16+02:00</started_at>\
         <ended_at>2018-04-09T17:50:00+02:00</ended_at>\
         <status>Passed</status></summary><tests>{}</tests></uut></uuts></test_report>",
        model, serial, tests
    )
}

pub fn encode(xml: &str) -> Vec<u8> {
    general_purpose::STANDARD.encode(xml).into_bytes()
}
