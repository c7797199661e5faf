/*!
# Welcome to Lawtest

Lawtest is a quiz service for law-study material. Administrators group tests
into law branches and author multi-question tests; users register, log in,
browse the catalog, and take tests.

Every application action travels over a single persistent WebSocket
connection as a stream of discrete JSON messages. Each inbound message names
an `action` and is answered by exactly one JSON response on the same
connection, so a browser client needs one socket for its whole session.

The wire protocol is documented in the [`networking`] module.

# Usage

```bash
cargo run
cargo run -- --config myconfig
```

*/
#[macro_use]
extern crate lazy_static;

pub mod catalog;
pub mod crypto;
pub mod grading;
pub mod networking;
pub mod runtime;
pub mod storage;
pub mod users;

/// Error returned by most fallible functions in this crate.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// A specialized `Result` type for lawtest operations.
pub type Result<T> = std::result::Result<T, Error>;
