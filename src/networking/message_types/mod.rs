/*!

Typed request schemas, one per action, grouped by action family. Each
schema is deserialized from the raw message before its handler body runs,
so a missing or mistyped field fails validation in one place instead of
ad hoc inside the handler.

*/

pub mod auth;
pub mod authoring;
pub mod catalog;
pub mod grading;
