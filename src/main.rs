/*!
# Lawtest Server

## Example Usage

```bash
lawtest_rust
lawtest_rust --config myconfig
```

## Dev

To run from source:

```bash
cargo run
cargo run -- --config myconfig
```
*/

use lawtest_rust::runtime;

#[tokio::main]
pub async fn main() -> lawtest_rust::Result<()> {
    tracing_subscriber::fmt::init();
    runtime::run().await
}
