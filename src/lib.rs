//! Heat-stress monitoring service.
//!
//! Ingests temperature/humidity readings (from a device or the simulator),
//! derives comfort and heat-stress indices, classifies the heat-stroke risk
//! level, keeps a bounded rolling history for charting, and pushes LINE
//! notifications on risk escalation.
//!
//! The typical entry point is [`pipeline::HeatMonitor`]:
//!
//! ```no_run
//! use heatmon_service::config::Config;
//! use heatmon_service::notify::line::LineNotifier;
//! use heatmon_service::pipeline::HeatMonitor;
//! use heatmon_service::simulate::SensorSimulator;
//!
//! let notifier = LineNotifier::from_env().expect("LINE credentials");
//! let mut monitor = HeatMonitor::new(Config::default())
//!     .expect("valid config")
//!     .with_notifier(Box::new(notifier));
//!
//! let mut sim = SensorSimulator::new();
//! let eval = monitor.ingest(sim.next_reading(chrono::Utc::now()));
//! println!("risk: {}", eval.level);
//! ```

pub mod advice;
pub mod alert;
pub mod config;
pub mod history;
pub mod indices;
pub mod logging;
pub mod model;
pub mod notify;
pub mod pipeline;
pub mod simulate;
