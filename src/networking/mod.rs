/*!

# Networking Interfaces and Methods

## Introduction

Lawtest exposes a single WebSocket endpoint at `/ws` which multiplexes every
application action over one persistent full-duplex connection. A client
sends discrete JSON text frames; each frame is answered by exactly one JSON
text frame on the same connection, in arrival order.

## Request envelope

Every request is a JSON object with a required `action` string field plus
action-specific fields:

```json
{"action": "get_test_collections", "lawBranchId": 3}
```

## Response envelope

Every response carries the same two discriminator fields so a client can
route responses uniformly:

```json
{"action": "get_law_branches", "status": "success", "branches": [...]}
{"action": "login", "status": "error", "message": "Invalid username or password"}
```

The one exception is input whose action could not be determined at all
(unparseable text, missing or non-string `action`, unknown action name),
which is answered with the generic fallback:

```json
{"status": "error", "message": "Unknown action"}
```

No failure of any kind closes the connection; the loop keeps reading.

## Actions

| action | required fields | success payload |
|---|---|---|
| `get_law_branches` | — | `branches` |
| `get_test_collections` | `lawBranchId` (number or numeric string) | `collections` (tests with questions) |
| `get_test_questions` | `testCollectionId` | `questions` |
| `submit_test_answer` | `testId`, `answers` | `result` |
| `create_test` | `test` {name, testType, lawBranchId, questions[]} | `test` |
| `create_question` | `question` {text, options[], correctAnswer, testId} | `question` |
| `create_law_branch` | `name` (+ optional `description`) | `branch` |
| `register` | `username`, `password` | `user`, `token` |
| `login` | `username`, `password` | `user`, `token` |

Request field shapes live in [`message_types`]; the dispatch table itself in
[`dispatcher`].

*/

pub mod dispatcher;
pub mod envelope;
pub mod filters;
pub mod handlers;
pub mod message_types;
pub mod network;
pub mod socket;
