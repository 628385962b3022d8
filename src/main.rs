use std::fmt::Display;
use std::process;

use roster_sync::api_key::resolve_api_key;
use roster_sync::clan_api::fetch_clan;
use roster_sync::config::Config;
use roster_sync::extras::{load_extras, save_extras};
use roster_sync::persist::{read_json_object, write_pretty_json};
use roster_sync::roster::{build_roster, run_timestamp, RosterFile};
use roster_sync::site_stats::apply_site_stats;

fn main() {
    let config = Config::from_env();

    let Some(api_key) = resolve_api_key(&config.env_path()) else {
        eprintln!("ERROR: No API key found.");
        eprintln!("Set CR_API_KEY in your environment or in .env at the project root.");
        process::exit(1);
    };

    println!("Fetching clan #{}...", config.clan_tag);
    let clan = match fetch_clan(&api_key, &config.api_base, &config.clan_tag) {
        Ok(clan) => clan,
        Err(failure) => {
            eprintln!("{failure}");
            process::exit(1);
        }
    };

    // Guard against wiping roster.json on an empty (or malformed) response.
    if clan.member_list.is_empty() {
        eprintln!("ERROR: API returned 0 members. Aborting to prevent accidental wipe.");
        process::exit(1);
    }

    let site_path = config.site_path();
    let mut site = or_die(read_json_object(&site_path));
    let stats = apply_site_stats(&mut site, &clan);
    or_die(write_pretty_json(&site_path, &site));
    println!(
        "Updated site.json: members={}, score={}, warTrophies={}, donations/wk={}, totalTrophies={}, avgLevel={}",
        stats.member_count,
        stats.clan_score,
        stats.clan_war_trophies,
        stats.donations_per_week,
        stats.total_trophies,
        stats.avg_level
    );

    let extras_path = config.extras_path();
    let mut extras = or_die(load_extras(&extras_path));

    let now = run_timestamp();
    let build = build_roster(&clan.member_list, &mut extras, &now);

    let roster = RosterFile {
        updated: now.clone(),
        members: build.members,
    };
    or_die(write_pretty_json(&config.roster_path(), &roster));
    println!(
        "Wrote {} members to roster.json (updated: {})",
        roster.members.len(),
        now
    );

    if !build.new_tags.is_empty() {
        or_die(save_extras(&extras_path, &extras));
        println!(
            "Added {} new member(s) to roster-extra.json: {}",
            build.new_tags.len(),
            build.new_tags.join(", ")
        );
    }
}

fn or_die<T, E: Display>(result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            eprintln!("ERROR: {err:#}");
            process::exit(1);
        }
    }
}
