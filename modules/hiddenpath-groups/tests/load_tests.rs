#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for loading hidden path groups files

use std::io::Write;
use std::path::Path;

use hiddenpath_groups::{
    DecodeError, GroupId, GroupIdError, Groups, IsdAsn, LoadError, Role, ValidationError,
    load_groups, load_groups_layered, parse_group_id,
};
use tempfile::NamedTempFile;

fn create_temp_yaml(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn ia(s: &str) -> IsdAsn {
    s.parse().unwrap()
}

const SINGLE_GROUP: &str = r#"
groups:
  ff00:0:1-1a:
    owner: "1-ff00:0:1"
    writers:
      - "1-ff00:0:2"
    registries:
      - "1-ff00:0:1"
"#;

const FULL: &str = r#"
groups:
  ff00:0:110-69b5:
    owner: "1-ff00:0:110"
    writers:
      - "1-ff00:0:112"
      - "1-ff00:0:111"
    readers:
      - "1-ff00:0:114"
    registries:
      - "1-ff00:0:110"
      - "1-ff00:0:113"
  ff00_0_111-1:
    owner: "1-ff00:0:111"
    writers: ["1-ff00:0:111"]
    registries: ["1-ff00:0:110"]
"#;

// =============================================================================
// Disabled / empty sources
// =============================================================================

#[test]
fn test_empty_path_means_disabled() {
    assert!(load_groups("").unwrap().is_none());
    assert!(load_groups(Path::new("")).unwrap().is_none());
}

#[test]
fn test_layered_without_paths_means_disabled() {
    let none: [&Path; 0] = [];
    assert!(load_groups_layered(&none).unwrap().is_none());
    assert!(load_groups_layered(&["", ""]).unwrap().is_none());
}

#[test]
fn test_file_without_groups_is_empty_registry() {
    let file = create_temp_yaml("groups: {}\n");
    let groups = load_groups(file.path()).unwrap().expect("registry present");
    assert!(groups.is_empty());

    let file = create_temp_yaml("");
    let groups = load_groups(file.path()).unwrap().expect("registry present");
    assert!(groups.is_empty());
}

// =============================================================================
// Successful loads
// =============================================================================

#[test]
fn test_load_single_group() {
    let file = create_temp_yaml(SINGLE_GROUP);
    let groups = load_groups(file.path()).unwrap().unwrap();

    assert_eq!(groups.len(), 1);
    let id = parse_group_id("ff00:0:1-1a").unwrap();
    assert_eq!(groups.ids(), vec![id]);

    let group = groups.get(&id).unwrap();
    assert_eq!(group.validate(), Ok(()));
    assert_eq!(group.owner, ia("1-ff00:0:1"));
    assert!(group.readers.is_empty());
    assert_eq!(group.registry_list(), vec![ia("1-ff00:0:1")]);
}

#[test]
fn test_load_full_file() {
    let file = create_temp_yaml(FULL);
    let groups = load_groups(file.path()).unwrap().unwrap();

    assert_eq!(groups.len(), 2);
    let id: GroupId = "ff00:0:110-69b5".parse().unwrap();
    let group = groups.get(&id).unwrap();
    assert_eq!(group.writers.len(), 2);
    assert!(group.readers.contains(&ia("1-ff00:0:114")));
    assert!(groups.contains(&"ff00:0:111-1".parse().unwrap()));

    let owned: Vec<_> = groups
        .groups_with_role(&ia("1-ff00:0:111"), Role::Owner)
        .map(|g| g.id.to_string())
        .collect();
    assert_eq!(owned, vec!["ff00:0:111-1"]);
}

#[test]
fn test_yaml_roundtrip_is_canonical() {
    let file = create_temp_yaml(FULL);
    let groups = load_groups(file.path()).unwrap().unwrap();

    let yaml = serde_saphyr::to_string(&groups).unwrap();
    let reparsed: Groups = serde_saphyr::from_str(&yaml).unwrap();
    assert_eq!(reparsed, groups);

    // Second pass produces identical text.
    assert_eq!(serde_saphyr::to_string(&reparsed).unwrap(), yaml);

    let underscored = yaml.find("ff00_0_111");
    assert!(underscored.is_none(), "keys are written in canonical form:\n{yaml}");
    let w111 = yaml.find("1-ff00:0:111").unwrap();
    let w112 = yaml.find("1-ff00:0:112").unwrap();
    assert!(w111 < w112, "writers are sorted:\n{yaml}");
}

#[test]
fn test_layered_later_file_wins() {
    let base = create_temp_yaml(FULL);
    let overlay = create_temp_yaml(
        r#"
groups:
  ff00:0:111-1:
    owner: "1-ff00:0:111"
    writers: ["1-ff00:0:115"]
    readers: ["1-ff00:0:116"]
    registries: ["1-ff00:0:111"]
"#,
    );

    let groups = load_groups_layered(&[base.path(), overlay.path()])
        .unwrap()
        .unwrap();
    assert_eq!(groups.len(), 2);

    let group = groups.get(&"ff00:0:111-1".parse().unwrap()).unwrap();
    assert_eq!(group.writers.len(), 1);
    assert!(group.writers.contains(&ia("1-ff00:0:115")));
    assert!(group.readers.contains(&ia("1-ff00:0:116")));
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.yml");
    let err = load_groups(&path).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }), "got {err:?}");
    assert_eq!(err.path(), path.as_path());
}

#[test]
fn test_malformed_yaml_is_parse_error() {
    let file = create_temp_yaml("groups: [unterminated\n");
    let err = load_groups(file.path()).unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }), "got {err:?}");
    assert!(err.to_string().contains("parsing groups file"));
}

#[test]
fn test_unknown_section_is_parse_error() {
    let file = create_temp_yaml(
        r#"
groups:
  ff00:0:1-1a:
    owner: "1-ff00:0:1"
    publishers: ["1-ff00:0:2"]
"#,
    );
    let err = load_groups(file.path()).unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }), "got {err:?}");
}

#[test]
fn test_bad_group_id_is_decode_error() {
    let file = create_temp_yaml(
        r#"
groups:
  1-ff00:0:1-1a:
    owner: "1-ff00:0:1"
    writers: ["1-ff00:0:2"]
    registries: ["1-ff00:0:1"]
"#,
    );
    let err = load_groups(file.path()).unwrap_err();
    let LoadError::Decode { source, .. } = err else {
        panic!("expected decode error, got {err:?}");
    };
    assert!(matches!(source, DecodeError::GroupId(_)), "got {source:?}");
}

#[test]
fn test_signed_numbers_are_decode_errors() {
    let file = create_temp_yaml(
        r#"
groups:
  ff00:0:1-+1a:
    owner: "1-ff00:0:1"
    writers: ["1-ff00:0:2"]
    registries: ["1-ff00:0:1"]
"#,
    );
    let err = load_groups(file.path()).unwrap_err();
    let LoadError::Decode { source, .. } = err else {
        panic!("expected decode error, got {err:?}");
    };
    assert!(
        matches!(source, DecodeError::GroupId(GroupIdError::Suffix { .. })),
        "got {source:?}"
    );

    let file = create_temp_yaml(
        r#"
groups:
  ff00:0:1-1a:
    owner: "+1-ff00:0:1"
    writers: ["1-ff00:0:2"]
    registries: ["1-ff00:0:1"]
"#,
    );
    let err = load_groups(file.path()).unwrap_err();
    let LoadError::Decode { source, .. } = err else {
        panic!("expected decode error, got {err:?}");
    };
    assert!(matches!(source, DecodeError::Owner { .. }), "got {source:?}");
}

#[test]
fn test_missing_owner_is_decode_error() {
    let file = create_temp_yaml(
        r#"
groups:
  ff00:0:1-1a:
    writers: ["1-ff00:0:2"]
    registries: ["1-ff00:0:1"]
"#,
    );
    let err = load_groups(file.path()).unwrap_err();
    let LoadError::Decode { source, .. } = err else {
        panic!("expected decode error, got {err:?}");
    };
    assert!(matches!(source, DecodeError::Owner { .. }), "got {source:?}");
}

#[test]
fn test_bad_registry_entry_is_decode_error() {
    let file = create_temp_yaml(
        r#"
groups:
  ff00:0:1-1a:
    owner: "1-ff00:0:1"
    writers: ["1-ff00:0:2"]
    registries: ["1-ff00:0:1", "ff00:0:3"]
"#,
    );
    let err = load_groups(file.path()).unwrap_err();
    let LoadError::Decode { source, .. } = err else {
        panic!("expected decode error, got {err:?}");
    };
    let DecodeError::Member { role, raw, .. } = source else {
        panic!("expected member error, got {source:?}");
    };
    assert_eq!(role, Role::Registry);
    assert_eq!(raw, "ff00:0:3");
}

#[test]
fn test_invalid_group_is_validation_error() {
    let file = create_temp_yaml(
        r#"
groups:
  ff00:0:1-1a:
    owner: "1-ff00:0:2"
    writers: ["1-ff00:0:2"]
    registries: ["1-ff00:0:1"]
"#,
    );
    let err = load_groups(file.path()).unwrap_err();
    let LoadError::Validation { path, source } = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(path, file.path());
    assert!(matches!(source, ValidationError::OwnerMismatch { .. }));
}

#[test]
fn test_layered_validation_error_names_defining_file() {
    let good = create_temp_yaml(SINGLE_GROUP);
    let bad = create_temp_yaml(
        r#"
groups:
  ff00:0:5-5:
    owner: "1-ff00:0:5"
    writers: ["1-ff00:0:5"]
"#,
    );
    let later = create_temp_yaml("groups: {}\n");

    let err = load_groups_layered(&[good.path(), bad.path(), later.path()]).unwrap_err();
    let LoadError::Validation { path, source } = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(path, bad.path());
    assert!(matches!(source, ValidationError::EmptyRegistries { .. }));
}
