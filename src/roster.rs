use chrono::Utc;
use serde::Serialize;

use crate::clan_api::ApiMember;
use crate::extras::{ExtrasEntry, ExtrasMap};

/// Display roles for the site. Unrecognized API roles collapse to `Member`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    Leader,
    #[serde(rename = "Co-Leader")]
    CoLeader,
    Elder,
    Member,
}

impl Role {
    pub fn from_api(raw: &str) -> Self {
        match raw {
            "leader" => Role::Leader,
            "coLeader" => Role::CoLeader,
            "elder" => Role::Elder,
            _ => Role::Member,
        }
    }
}

/// One merged roster entry: live fields from the API, custom fields from the
/// extras store. Field order here is the field order in roster.json.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterMember {
    pub name: String,
    pub tag: String,
    pub role: Role,
    pub exp_level: u32,
    pub trophies: u32,
    pub arena: String,
    pub clan_rank: u32,
    pub donations: u32,
    pub donations_received: u32,
    pub last_seen: String,
    pub note: String,
    pub profile_url: String,
    pub address: String,
    pub date_joined: String,
}

/// Top-level shape of roster.json.
#[derive(Debug, Clone, Serialize)]
pub struct RosterFile {
    pub updated: String,
    pub members: Vec<RosterMember>,
}

#[derive(Debug, Clone, Default)]
pub struct RosterBuild {
    pub members: Vec<RosterMember>,
    /// Tags provisioned into the extras map during this build, in API order.
    pub new_tags: Vec<String>,
}

/// The run's reference time, second precision UTC.
pub fn run_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Merge API members with the extras map. Unseen tags get a fresh extras
/// entry with `date_joined = now`; existing entries are never overwritten.
/// Output is sorted longest-tenured first (date_joined ascending), with the
/// case-insensitive name as tie-break.
pub fn build_roster(api_members: &[ApiMember], extras: &mut ExtrasMap, now: &str) -> RosterBuild {
    let mut members = Vec::with_capacity(api_members.len());
    let mut new_tags = Vec::new();

    for api in api_members {
        let tag = api.normalized_tag();
        let extra = extras.entry(tag.clone()).or_insert_with(|| {
            new_tags.push(tag.clone());
            ExtrasEntry::provisioned(now)
        });

        // A hand-edited extras entry may omit date_joined; the merged output
        // falls back to the run timestamp, the stored entry stays as-is.
        let date_joined = if extra.date_joined.is_empty() {
            now.to_string()
        } else {
            extra.date_joined.clone()
        };

        members.push(RosterMember {
            name: api.name.clone().unwrap_or_else(|| "Unknown".to_string()),
            tag,
            role: Role::from_api(&api.role),
            exp_level: api.exp_level,
            trophies: api.trophies,
            arena: api.arena_name(),
            clan_rank: api.clan_rank,
            donations: api.donations,
            donations_received: api.donations_received,
            last_seen: api.last_seen.clone(),
            note: extra.note.clone(),
            profile_url: extra.profile_url.clone(),
            address: extra.address.clone(),
            date_joined,
        });
    }

    members.sort_by(|a, b| {
        a.date_joined
            .cmp(&b.date_joined)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });

    RosterBuild { members, new_tags }
}
