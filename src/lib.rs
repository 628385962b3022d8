//! Updates `roster.json` and `site.json` from the Clash Royale API,
//! merged with the locally curated `roster-extra.json` custom data.

pub mod api_key;
pub mod clan_api;
pub mod config;
pub mod extras;
pub mod persist;
pub mod roster;
pub mod site_stats;
