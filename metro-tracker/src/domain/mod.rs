//! Domain types for the metro departure tracker.
//!
//! Small validated value types shared by the upstream client, the
//! projector and the presentation layer.

mod line;
mod site;
mod time;

pub use line::LineColour;
pub use site::{InvalidSiteId, SiteId};
pub use time::{NETWORK_TZ, format_local, parse_local};
