use roadmap_rs::core::Version;

#[test]
fn parses_plain_semantic_version() {
    let version = Version::parse("9.1.0").expect("parseable title");
    assert_eq!(version.major, 9);
    assert_eq!(version.minor, 1);
    assert_eq!(version.patch, 0);
}

#[test]
fn parses_version_embedded_in_title() {
    let version = Version::parse("Release v10.2.3 (stabilization)").expect("parseable title");
    assert_eq!((version.major, version.minor, version.patch), (10, 2, 3));
}

#[test]
fn first_match_wins_when_title_has_several_versions() {
    let version = Version::parse("8.0.0 follow-up for 7.9.1").expect("parseable title");
    assert_eq!((version.major, version.minor, version.patch), (8, 0, 0));
}

#[test]
fn title_without_version_is_unschedulable() {
    assert_eq!(Version::parse("Backlog"), None);
    assert_eq!(Version::parse(""), None);
}

#[test]
fn two_component_version_is_not_enough() {
    assert_eq!(Version::parse("sprint 2.0"), None);
}

#[test]
fn versions_order_by_component() {
    let older = Version::parse("9.1.1").expect("older");
    let newer = Version::parse("9.1.2").expect("newer");
    let next_major = Version::parse("10.0.0").expect("next major");

    assert!(older < newer);
    assert!(newer < next_major);
}

#[test]
fn major_and_series_classification() {
    let major = Version::parse("9.1.0").expect("major");
    let minor = Version::parse("9.1.2").expect("minor");

    assert!(major.is_major());
    assert!(!minor.is_major());
    assert_eq!(major.series(), (9, 1));
    assert_eq!(minor.series(), (9, 1));
}
