//! Table-driven tests for topology resolution.

mod common;

use common::{envs, group_names, EnvBuilder};
use stagecraft::topology::{resolve_topology, EnvironmentGroup, Priority};

struct ExpectedGroup {
    name: &'static str,
    distance: u32,
    priority: Priority,
    /// `(name, distance, priority)` in resolved order.
    environments: &'static [(&'static str, u32, Priority)],
}

struct TopologyTestCase {
    name: &'static str,
    input: fn() -> Vec<(&'static str, EnvBuilder)>,
    expected: &'static [ExpectedGroup],
}

const TOPOLOGY_TESTS: &[TopologyTestCase] = &[
    TopologyTestCase {
        name: "simple_chain",
        input: || {
            vec![
                ("dev", EnvBuilder::latest()),
                ("staging", EnvBuilder::after("dev")),
                ("prod", EnvBuilder::after("staging")),
            ]
        },
        expected: &[
            ExpectedGroup {
                name: "dev",
                distance: 0,
                priority: Priority::Upstream,
                environments: &[("dev", 0, Priority::Upstream)],
            },
            ExpectedGroup {
                name: "staging",
                distance: 1,
                priority: Priority::PreProd,
                environments: &[("staging", 1, Priority::PreProd)],
            },
            ExpectedGroup {
                name: "prod",
                distance: 2,
                priority: Priority::Prod,
                environments: &[("prod", 2, Priority::Prod)],
            },
        ],
    },
    TopologyTestCase {
        name: "two_environments_in_a_loop",
        input: || {
            vec![
                ("dev-de", EnvBuilder::after("staging-de")),
                ("staging-de", EnvBuilder::after("dev-de")),
            ]
        },
        expected: &[
            ExpectedGroup {
                name: "dev-de",
                distance: 667,
                priority: Priority::Canary,
                environments: &[("dev-de", 667, Priority::Other)],
            },
            ExpectedGroup {
                name: "staging-de",
                distance: 668,
                priority: Priority::Prod,
                environments: &[("staging-de", 668, Priority::Other)],
            },
        ],
    },
    TopologyTestCase {
        name: "non_existent_upstream",
        input: || {
            vec![
                ("dev-de", EnvBuilder::latest()),
                ("staging-de", EnvBuilder::after("whoknows")),
            ]
        },
        expected: &[
            ExpectedGroup {
                name: "dev-de",
                distance: 0,
                priority: Priority::Upstream,
                environments: &[("dev-de", 0, Priority::Yolo)],
            },
            ExpectedGroup {
                name: "staging-de",
                distance: 667,
                priority: Priority::Prod,
                environments: &[("staging-de", 667, Priority::Prod)],
            },
        ],
    },
    TopologyTestCase {
        name: "no_upstream_at_all",
        input: || vec![("lonely", EnvBuilder::new())],
        expected: &[ExpectedGroup {
            name: "lonely",
            distance: 100,
            priority: Priority::Prod,
            environments: &[("lonely", 100, Priority::Prod)],
        }],
    },
    TopologyTestCase {
        name: "two_chains_of_different_length",
        input: || {
            vec![
                ("dev-de", EnvBuilder::latest()),
                ("staging-de", EnvBuilder::after("dev-de")),
                ("canary-de", EnvBuilder::after("staging-de")),
                ("prod-de", EnvBuilder::after("canary-de")),
                ("dev-fr", EnvBuilder::latest()),
                ("staging-fr", EnvBuilder::after("dev-fr")),
                ("prod-fr", EnvBuilder::after("staging-fr")),
            ]
        },
        expected: &[
            ExpectedGroup {
                name: "dev-de",
                distance: 0,
                priority: Priority::Upstream,
                environments: &[("dev-de", 0, Priority::Upstream)],
            },
            ExpectedGroup {
                name: "dev-fr",
                distance: 0,
                priority: Priority::Upstream,
                environments: &[("dev-fr", 0, Priority::Upstream)],
            },
            ExpectedGroup {
                name: "staging-de",
                distance: 1,
                priority: Priority::PreProd,
                environments: &[("staging-de", 1, Priority::PreProd)],
            },
            ExpectedGroup {
                name: "staging-fr",
                distance: 1,
                priority: Priority::PreProd,
                environments: &[("staging-fr", 1, Priority::PreProd)],
            },
            ExpectedGroup {
                name: "canary-de",
                distance: 2,
                priority: Priority::Canary,
                environments: &[("canary-de", 2, Priority::Canary)],
            },
            ExpectedGroup {
                name: "prod-fr",
                distance: 2,
                priority: Priority::Canary,
                environments: &[("prod-fr", 2, Priority::Prod)],
            },
            ExpectedGroup {
                name: "prod-de",
                distance: 3,
                priority: Priority::Prod,
                environments: &[("prod-de", 3, Priority::Prod)],
            },
        ],
    },
    TopologyTestCase {
        name: "three_groups_with_two_environments_each",
        input: || {
            vec![
                ("dev-de", EnvBuilder::latest().group("dev")),
                ("dev-fr", EnvBuilder::latest().group("dev")),
                ("staging-de", EnvBuilder::after("dev-de").group("staging")),
                ("staging-fr", EnvBuilder::after("dev-fr").group("staging")),
                ("prod-de", EnvBuilder::after("staging-de").group("prod")),
                ("prod-fr", EnvBuilder::after("staging-fr").group("prod")),
            ]
        },
        expected: &[
            ExpectedGroup {
                name: "dev",
                distance: 0,
                priority: Priority::Upstream,
                environments: &[
                    ("dev-de", 0, Priority::Upstream),
                    ("dev-fr", 0, Priority::Upstream),
                ],
            },
            ExpectedGroup {
                name: "staging",
                distance: 1,
                priority: Priority::PreProd,
                environments: &[
                    ("staging-de", 1, Priority::PreProd),
                    ("staging-fr", 1, Priority::PreProd),
                ],
            },
            ExpectedGroup {
                name: "prod",
                distance: 2,
                priority: Priority::Prod,
                environments: &[
                    ("prod-de", 2, Priority::Prod),
                    ("prod-fr", 2, Priority::Prod),
                ],
            },
        ],
    },
    TopologyTestCase {
        name: "environments_with_different_priorities_in_one_group",
        input: || {
            vec![
                ("dev-global", EnvBuilder::latest().group("dev")),
                ("test-global", EnvBuilder::after("dev-global").group("test")),
                ("staging-de", EnvBuilder::after("test-global").group("staging")),
                ("staging-fr", EnvBuilder::after("test-global").group("staging")),
                ("canary-de", EnvBuilder::after("staging-de").group("canary")),
                ("prod-fr", EnvBuilder::after("staging-fr").group("canary")),
                ("prod-de", EnvBuilder::after("canary-de").group("prod")),
            ]
        },
        expected: &[
            ExpectedGroup {
                name: "dev",
                distance: 0,
                priority: Priority::Upstream,
                environments: &[("dev-global", 0, Priority::Upstream)],
            },
            ExpectedGroup {
                name: "test",
                distance: 1,
                priority: Priority::Other,
                environments: &[("test-global", 1, Priority::PreProd)],
            },
            ExpectedGroup {
                name: "staging",
                distance: 2,
                priority: Priority::PreProd,
                environments: &[
                    ("staging-de", 2, Priority::PreProd),
                    ("staging-fr", 2, Priority::Canary),
                ],
            },
            ExpectedGroup {
                name: "canary",
                distance: 3,
                priority: Priority::Canary,
                environments: &[
                    ("canary-de", 3, Priority::Canary),
                    ("prod-fr", 3, Priority::Prod),
                ],
            },
            ExpectedGroup {
                name: "prod",
                distance: 4,
                priority: Priority::Prod,
                environments: &[("prod-de", 4, Priority::Prod)],
            },
        ],
    },
];

fn assert_groups(name: &str, actual: &[EnvironmentGroup], expected: &[ExpectedGroup]) {
    let expected_names: Vec<&str> = expected.iter().map(|g| g.name).collect();
    assert_eq!(
        group_names(actual),
        expected_names,
        "Test '{}': group order differs",
        name
    );

    for (group, want) in actual.iter().zip(expected) {
        assert_eq!(
            (group.distance_to_upstream, group.priority),
            (want.distance, want.priority),
            "Test '{}': group '{}'",
            name,
            want.name
        );
        let got: Vec<(&str, u32, Priority)> = group
            .environments
            .iter()
            .map(|e| (e.name.as_str(), e.distance_to_upstream, e.priority))
            .collect();
        assert_eq!(
            got,
            want.environments.to_vec(),
            "Test '{}': environments of group '{}'",
            name,
            want.name
        );
    }
}

#[test]
fn test_topology_resolution() {
    for test_case in TOPOLOGY_TESTS {
        let groups = resolve_topology(&envs((test_case.input)()));
        assert_groups(test_case.name, &groups, test_case.expected);
    }
}

#[test]
fn test_resolution_is_independent_of_input_order() {
    for test_case in TOPOLOGY_TESTS {
        let forward = resolve_topology(&envs((test_case.input)()));
        let mut reversed_input = (test_case.input)();
        reversed_input.reverse();
        let reversed = resolve_topology(&envs(reversed_input));
        assert_eq!(forward, reversed, "Test '{}'", test_case.name);
    }
}

#[test]
fn test_empty_input() {
    assert!(resolve_topology(&envs(vec![])).is_empty());
}

#[test]
fn test_group_wire_format() {
    let groups = resolve_topology(&envs(vec![
        ("dev", EnvBuilder::latest()),
        ("prod", EnvBuilder::after("dev")),
    ]));
    let json = serde_json::to_value(&groups).unwrap();
    assert_eq!(json[0]["environmentGroupName"], "dev");
    assert_eq!(json[0]["distanceToUpstream"], 0);
    assert_eq!(json[0]["priority"], "UPSTREAM");
    assert_eq!(json[0]["environments"][0]["config"]["upstream"]["latest"], true);
    assert_eq!(json[1]["environments"][0]["priority"], "PROD");
    assert_eq!(
        json[1]["environments"][0]["config"]["upstream"]["environment"],
        "dev"
    );
}
