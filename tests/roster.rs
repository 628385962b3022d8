use roster_sync::clan_api::ApiMember;
use roster_sync::extras::{ExtrasEntry, ExtrasMap};
use roster_sync::roster::build_roster;

const NOW: &str = "2024-01-06T12:00:00Z";

fn member(tag: &str, name: &str) -> ApiMember {
    ApiMember {
        tag: tag.to_string(),
        name: Some(name.to_string()),
        ..ApiMember::default()
    }
}

fn seeded_entry(date_joined: &str) -> ExtrasEntry {
    ExtrasEntry {
        date_joined: date_joined.to_string(),
        ..ExtrasEntry::default()
    }
}

#[test]
fn provisions_unseen_tags_with_run_timestamp() {
    let api = vec![member("#AAA", "Ann"), member("#BBB", "Ben")];
    let mut extras = ExtrasMap::new();

    let build = build_roster(&api, &mut extras, NOW);

    assert_eq!(build.new_tags, vec!["AAA".to_string(), "BBB".to_string()]);
    assert_eq!(extras.len(), 2);
    for tag in ["AAA", "BBB"] {
        let entry = extras.get(tag).expect("entry should be provisioned");
        assert_eq!(entry.date_joined, NOW);
        assert_eq!(entry.note, "");
        assert_eq!(entry.profile_url, "");
        assert_eq!(entry.address, "");
    }

    // Every API tag appears exactly once in the output.
    let mut tags: Vec<&str> = build.members.iter().map(|m| m.tag.as_str()).collect();
    tags.sort_unstable();
    assert_eq!(tags, vec!["AAA", "BBB"]);
}

#[test]
fn existing_extras_are_never_overwritten() {
    let api = vec![member("#AAA", "Ann")];
    let mut extras = ExtrasMap::new();
    extras.insert(
        "AAA".to_string(),
        ExtrasEntry {
            note: "founding member".to_string(),
            profile_url: "https://royaleapi.com/player/AAA".to_string(),
            address: "somewhere".to_string(),
            date_joined: "2020-03-15T00:00:00Z".to_string(),
        },
    );

    let build = build_roster(&api, &mut extras, NOW);

    assert!(build.new_tags.is_empty());
    let ann = &build.members[0];
    assert_eq!(ann.note, "founding member");
    assert_eq!(ann.profile_url, "https://royaleapi.com/player/AAA");
    assert_eq!(ann.address, "somewhere");
    assert_eq!(ann.date_joined, "2020-03-15T00:00:00Z");
    assert_eq!(extras.get("AAA").unwrap().date_joined, "2020-03-15T00:00:00Z");
}

#[test]
fn sorts_by_date_joined_ascending() {
    let api = vec![
        member("#NEW", "Newcomer"),
        member("#OLD", "Oldtimer"),
        member("#MID", "Midway"),
    ];
    let mut extras = ExtrasMap::new();
    extras.insert("NEW".to_string(), seeded_entry("2024-01-01T00:00:00Z"));
    extras.insert("OLD".to_string(), seeded_entry("2021-06-01T00:00:00Z"));
    extras.insert("MID".to_string(), seeded_entry("2023-02-01T00:00:00Z"));

    let build = build_roster(&api, &mut extras, NOW);

    let names: Vec<&str> = build.members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Oldtimer", "Midway", "Newcomer"]);
}

#[test]
fn equal_dates_tie_break_case_insensitively() {
    let api = vec![member("#B", "Bob"), member("#A", "alice")];
    let mut extras = ExtrasMap::new();
    extras.insert("A".to_string(), seeded_entry("2023-01-01"));
    extras.insert("B".to_string(), seeded_entry("2023-01-01"));

    let build = build_roster(&api, &mut extras, NOW);

    let names: Vec<&str> = build.members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["alice", "Bob"]);
}

#[test]
fn rebuild_with_persisted_extras_is_idempotent() {
    let api = vec![
        member("#AAA", "Ann"),
        member("#BBB", "Ben"),
        member("#CCC", "Cal"),
    ];
    let mut extras = ExtrasMap::new();

    let first = build_roster(&api, &mut extras, NOW);
    assert_eq!(first.new_tags.len(), 3);

    let mut persisted = extras.clone();
    let second = build_roster(&api, &mut persisted, NOW);

    assert!(second.new_tags.is_empty());
    assert_eq!(first.members, second.members);
    assert_eq!(extras, persisted);
}

#[test]
fn undated_extras_entry_falls_back_to_run_timestamp() {
    let api = vec![member("#AAA", "Ann")];
    let mut extras = ExtrasMap::new();
    // Hand-edited entry with the date_joined field left out.
    extras.insert(
        "AAA".to_string(),
        ExtrasEntry {
            note: "old hand".to_string(),
            ..ExtrasEntry::default()
        },
    );

    let build = build_roster(&api, &mut extras, NOW);

    assert!(build.new_tags.is_empty());
    assert_eq!(build.members[0].date_joined, NOW);
    assert_eq!(build.members[0].note, "old hand");
    // The stored entry is not backfilled; only the merged output gets a date.
    assert_eq!(extras.get("AAA").unwrap().date_joined, "");
}

#[test]
fn missing_name_falls_back_to_unknown() {
    let api = vec![ApiMember {
        tag: "#GHOST".to_string(),
        ..ApiMember::default()
    }];
    let mut extras = ExtrasMap::new();

    let build = build_roster(&api, &mut extras, NOW);

    assert_eq!(build.members[0].name, "Unknown");
    assert_eq!(build.members[0].tag, "GHOST");
}
