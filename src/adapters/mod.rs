//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements        | Connects to                    |
//! |---------------|-------------------|--------------------------------|
//! | `hardware`    | SensorPort        | Potentiometer ADCs             |
//! |               | DisplayPort       | OLED text panel                |
//! |               | PatternPort       | 5×5 matrix, RGB indicator      |
//! |               | AudioPort         | Two buzzers                    |
//! |               | InputPort         | Button levels                  |
//! | `sim`         | `hardware::Board` | Host stand-ins for the above   |
//! | `log_sink`    | EventSink         | `log` output                   |
//! | `config_file` | ConfigPort        | JSON file (`NEUROSYNC_CONFIG`) |
//! | `time`        | —                 | Host monotonic clock           |

pub mod config_file;
pub mod hardware;
pub mod log_sink;
pub mod sim;
pub mod time;
