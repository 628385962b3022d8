use serde_json::{json, Map, Value};

use crate::clan_api::ClanResponse;

/// What was written into site.json, for the console summary line.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteStatsSummary {
    pub member_count: u32,
    pub clan_score: u64,
    pub clan_war_trophies: u64,
    pub donations_per_week: u64,
    pub total_trophies: u64,
    /// `11.0` style float, or integer `0` when the clan has no members.
    pub avg_level: Value,
}

/// One decimal place, ties to even. Levels are non-negative, so a tie is an
/// exactly representable `.x5` average (e.g. 41/4) and compares cleanly.
fn round_one_decimal(value: f64) -> f64 {
    let scaled = value * 10.0;
    let floor = scaled.floor();
    let rounded = if scaled - floor == 0.5 {
        if floor % 2.0 == 0.0 { floor } else { floor + 1.0 }
    } else {
        scaled.round()
    };
    rounded / 10.0
}

/// Update clan-level statistics in the site map. Keys not touched here are
/// preserved as-is (read-merge-write, never whole-file replacement).
pub fn apply_site_stats(site: &mut Map<String, Value>, clan: &ClanResponse) -> SiteStatsSummary {
    let total_trophies: u64 = clan
        .member_list
        .iter()
        .map(|m| u64::from(m.trophies))
        .sum();

    let count = clan.member_list.len();
    let avg_level = if count > 0 {
        let level_sum: u64 = clan
            .member_list
            .iter()
            .map(|m| u64::from(m.exp_level))
            .sum();
        json!(round_one_decimal(level_sum as f64 / count as f64))
    } else {
        json!(0)
    };

    site.insert("memberCount".to_string(), json!(clan.members));
    site.insert("clanScore".to_string(), json!(clan.clan_score));
    site.insert("clanWarTrophies".to_string(), json!(clan.clan_war_trophies));
    site.insert(
        "donationsPerWeek".to_string(),
        json!(clan.donations_per_week),
    );
    site.insert("minTrophies".to_string(), json!(clan.required_trophies));
    site.insert("totalTrophies".to_string(), json!(total_trophies));
    site.insert("avgLevel".to_string(), avg_level.clone());

    SiteStatsSummary {
        member_count: clan.members,
        clan_score: clan.clan_score,
        clan_war_trophies: clan.clan_war_trophies,
        donations_per_week: clan.donations_per_week,
        total_trophies,
        avg_level,
    }
}
