//! # Transitboard Core Library
//!
//! This library provides the core logic for Transitboard, a transit service
//! alerts dashboard. Everything the CLI can do goes through here; a GUI
//! would be another thin front-end over the same [`Dashboard`].
//!
//! ## Architecture
//!
//! - **Filter**: Pure predicate composition over alerts, criteria and a
//!   context carrying the clock and the rider's location
//! - **Store**: The current alert collection and its statistics
//! - **Storage**: SQLite key-value preferences and TOML configuration
//! - **Scheduler**: A wall-clock refresh timer that requires the caller to
//!   invoke `tick()`, plus a single-slot refresh gate
//! - **Notify**: Transient, auto-expiring notices
//!
//! ## Key Components
//!
//! - [`Dashboard`]: Session state and the refresh cycle
//! - [`filter::filter`]: The filter engine
//! - [`PreferenceStore`]: Saved criteria and UI settings
//! - [`AlertSource`]: Trait for alert feeds
//! - [`RenderTarget`]: Trait for whatever draws the dashboard

pub mod alert;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod export;
pub mod filter;
pub mod location;
pub mod notify;
pub mod render;
pub mod scheduler;
pub mod source;
pub mod storage;
pub mod store;

pub use alert::{Alert, Borough, Severity};
pub use dashboard::{Dashboard, ExportedFile};
pub use error::{ConfigError, CoreError, DatabaseError, LocationError, SourceError, ValidationError};
pub use events::DashboardEvent;
pub use export::ExportFormat;
pub use filter::{FilterContext, FilterCriteria, LineGroup, LocationScope, SeverityFilter, TimeScope};
pub use location::{FixedLocation, LocationFix, LocationProvider, NoLocation};
pub use notify::{Notice, NoticeKind, Notifier};
pub use render::{AlertCard, DashboardView, RenderTarget};
pub use scheduler::{RefreshPermit, RefreshTrigger, Scheduler, SchedulerState};
pub use source::{AlertSource, SimulatedSource};
pub use storage::{Config, Database, KvStore, MemoryKv, PreferenceStore, Preferences, UiSettings};
pub use store::{AlertStats, AlertStore};
