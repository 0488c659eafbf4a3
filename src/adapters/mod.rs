//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements     | Connects to                 |
//! |------------|----------------|-----------------------------|
//! | `hardware` | ButtonPort     | ESP32 GPIO (panic button)   |
//! |            | OutputPort     | ESP32 GPIO (LED/relay/buzz) |
//! | `log_sink` | EventSink      | Serial log output           |
//! | `serial`   | CommandChannel | Command UART                |
//! | `time`     | ClockPort      | ESP32 system timer          |

pub mod hardware;
pub mod log_sink;
pub mod serial;
pub mod time;
